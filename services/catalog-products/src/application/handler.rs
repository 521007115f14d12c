//! Business logic handler

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use vela_common::PagedResult;
use vela_errors::{AppError, AppResult};

use crate::domain::{
    NewProduct, Product, ProductEnvelope, ProductId, ProductListEnvelope, ProductPatch,
    ProductRepository, ResourceMeta,
};

use super::commands::*;
use super::queries::*;

/// 产品目录服务
///
/// 所有读写都经由仓储接口完成，每个操作对存储发起一到两条语句。
/// 存在性检查与后续写入之间没有事务保护，与并发软删除的竞争
/// 不做防护。
pub struct ServiceHandler {
    repo: Arc<dyn ProductRepository>,
}

impl ServiceHandler {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// 创建产品
    pub async fn create_product(&self, cmd: CreateProductCommand) -> AppResult<ProductEnvelope> {
        info!("Creating product: {}", cmd.name);

        cmd.validate()?;

        let product = self
            .repo
            .insert(NewProduct {
                name: cmd.name,
                price: cmd.price,
                description: cmd.description,
                available: cmd.available.unwrap_or(true),
            })
            .await?;

        info!(id = %product.id, "Product created");
        Ok(ProductEnvelope::new(ResourceMeta::created(), product))
    }

    /// 分页查询可见产品
    pub async fn find_all(&self, query: ListProductsQuery) -> AppResult<ProductListEnvelope> {
        let pagination = query.pagination;
        info!(
            page = pagination.page,
            limit = pagination.limit,
            "Listing products"
        );

        let total = self.repo.count_available().await?;
        let items = self.repo.list_available(&pagination).await?;

        Ok(ProductListEnvelope::new(PagedResult::new(
            items,
            total,
            &pagination,
        )))
    }

    /// 按 ID 查询可见产品
    pub async fn find_one(&self, query: GetProductQuery) -> AppResult<ProductEnvelope> {
        let product = self.find_product(query.id).await?;
        Ok(ProductEnvelope::new(ResourceMeta::found(), product))
    }

    /// 更新产品
    ///
    /// 存在性检查失败时直接以 NotFound 短路，没有兜底分支
    pub async fn update_product(&self, cmd: UpdateProductCommand) -> AppResult<ProductEnvelope> {
        info!(id = %cmd.id, "Updating product");

        cmd.validate()?;
        self.find_product(cmd.id).await?;

        let updated = self.repo.update(cmd.id, cmd.patch).await?;

        info!(id = %updated.id, "Product updated");
        Ok(ProductEnvelope::new(ResourceMeta::updated(), updated))
    }

    /// 软删除产品
    ///
    /// 已软删除的 id 在存在性检查时就会以 NotFound 失败，
    /// 不会出现第二次"删除成功"
    pub async fn remove_product(&self, cmd: RemoveProductCommand) -> AppResult<ProductEnvelope> {
        info!(id = %cmd.id, "Removing product");

        self.find_product(cmd.id).await?;

        let removed = self
            .repo
            .update(cmd.id, ProductPatch::unavailable())
            .await?;

        info!(id = %removed.id, "Product removed");
        Ok(ProductEnvelope::new(ResourceMeta::deleted(), removed))
    }

    /// 批量存在性校验
    ///
    /// 不过滤软删除状态：只要行存在（即便 available = false）就算命中。
    /// 该操作供其他服务消费，返回裸行，不走统一响应包装。
    pub async fn validate_products(
        &self,
        cmd: ValidateProductsCommand,
    ) -> AppResult<Vec<Product>> {
        let mut distinct = cmd.ids;
        distinct.sort();
        distinct.dedup();

        info!(count = distinct.len(), "Validating products");

        let products = self.repo.find_by_ids(&distinct).await?;

        if products.len() != distinct.len() {
            let found: HashSet<ProductId> = products.iter().map(|p| p.id).collect();
            let missing: Vec<String> = distinct
                .iter()
                .filter(|id| !found.contains(id))
                .map(|id| id.to_string())
                .collect();
            return Err(AppError::failed_dependency(format!(
                "Some products were not found: {}",
                missing.join(", ")
            )));
        }

        Ok(products)
    }

    /// 可见产品查找，缺失时统一返回 NotFound
    async fn find_product(&self, id: ProductId) -> AppResult<Product> {
        self.repo
            .find_available_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product with ID {} not found", id)))
    }
}
