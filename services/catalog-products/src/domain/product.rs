//! 产品实体

use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 产品 ID（数据库自增主键）
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    From,
)]
#[display("{_0}")]
pub struct ProductId(pub i32);

/// 产品实体
///
/// available = false 表示软删除，行不会被物理移除。
/// 软删除是单向的，没有恢复路径。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// 单价，最多 4 位小数
    pub price: Decimal,
    pub description: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建产品的字段集
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub available: bool,
}

/// 部分更新的字段集
///
/// 结构上不含 id，主键永远不会出现在被更新的字段集里
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl ProductPatch {
    /// 软删除用的字段集
    pub fn unavailable() -> Self {
        Self {
            available: Some(false),
            ..Default::default()
        }
    }
}
