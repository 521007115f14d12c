//! Product commands

use rust_decimal::Decimal;
use vela_errors::{AppError, AppResult};

use crate::domain::{ProductId, ProductPatch};

/// 单价校验：非负且最多 4 位小数
fn validate_price(price: &Decimal) -> AppResult<()> {
    if *price < Decimal::ZERO {
        return Err(AppError::validation("price must not be negative"));
    }
    if price.normalize().scale() > 4 {
        return Err(AppError::validation(
            "price must not have more than 4 decimal places",
        ));
    }
    Ok(())
}

/// 创建产品命令
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    /// 缺省 true
    pub available: Option<bool>,
}

impl CreateProductCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("name must not be empty"));
        }
        validate_price(&self.price)
    }
}

/// 更新产品命令
///
/// patch 中结构上不存在 id 字段，请求里携带的目标 id 只能来自
/// 命令本身，主键不可能被载荷改写
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub id: ProductId,
    pub patch: ProductPatch,
}

impl UpdateProductCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.id.0 <= 0 {
            return Err(AppError::validation("id must be a positive integer"));
        }
        if let Some(name) = &self.patch.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("name must not be empty"));
            }
        }
        if let Some(price) = &self.patch.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// 软删除产品命令
#[derive(Debug, Clone)]
pub struct RemoveProductCommand {
    pub id: ProductId,
}

/// 批量存在性校验命令
#[derive(Debug, Clone)]
pub struct ValidateProductsCommand {
    pub ids: Vec<ProductId>,
}
