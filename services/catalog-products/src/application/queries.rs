//! Product queries

use vela_common::Pagination;

use crate::domain::ProductId;

/// 按 ID 获取产品查询
#[derive(Debug, Clone)]
pub struct GetProductQuery {
    pub id: ProductId,
}

/// 分页列表查询
#[derive(Debug, Clone, Default)]
pub struct ListProductsQuery {
    pub pagination: Pagination,
}
