//! 产品仓储接口

use async_trait::async_trait;
use vela_common::Pagination;
use vela_errors::AppResult;

use super::product::{NewProduct, Product, ProductId, ProductPatch};

/// 产品仓储接口
///
/// 服务只依赖这五类持久层原语：带过滤的计数、带过滤和偏移的
/// 批量查询、按 ID 加过滤的单行查询、插入、按 ID 更新。
/// 任何实现了这些原语的存储都可以作为后端。
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 可见产品总数（available = true）
    async fn count_available(&self) -> AppResult<u64>;

    /// 分页查询可见产品
    async fn list_available(&self, pagination: &Pagination) -> AppResult<Vec<Product>>;

    /// 按 ID 查询可见产品，软删除的行视同不存在
    async fn find_available_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// 插入一行产品
    async fn insert(&self, product: NewProduct) -> AppResult<Product>;

    /// 按 ID 更新字段集（不含主键），返回更新后的行
    async fn update(&self, id: ProductId, patch: ProductPatch) -> AppResult<Product>;

    /// 按 ID 集合查询，不过滤软删除状态
    async fn find_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>>;
}
