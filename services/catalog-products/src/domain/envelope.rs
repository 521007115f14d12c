//! 响应包装
//!
//! 读写操作统一返回 { meta, data, links }。links 中的 HTTP 风格
//! 路径只是描述性元数据，本服务不会对其解引用。

use vela_common::{PagedResult, Pagination};

use super::product::{Product, ProductId};

/// 单资源操作元数据，每次响应只置位一个标志
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceMeta {
    pub is_created: bool,
    pub is_found: bool,
    pub is_updated: bool,
    pub is_deleted: bool,
}

impl ResourceMeta {
    pub fn created() -> Self {
        Self {
            is_created: true,
            ..Default::default()
        }
    }

    pub fn found() -> Self {
        Self {
            is_found: true,
            ..Default::default()
        }
    }

    pub fn updated() -> Self {
        Self {
            is_updated: true,
            ..Default::default()
        }
    }

    pub fn deleted() -> Self {
        Self {
            is_deleted: true,
            ..Default::default()
        }
    }
}

/// 单资源链接块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLinks {
    pub self_link: String,
    pub create: String,
    pub update: String,
    pub delete: String,
}

impl ResourceLinks {
    pub fn for_product(id: ProductId) -> Self {
        Self {
            self_link: format!("/products/{}", id),
            create: "/products".to_string(),
            update: format!("/products/{}", id),
            delete: format!("/products/{}", id),
        }
    }
}

/// 列表分页元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionMeta {
    pub total_items: u64,
    /// 实际返回的行数
    pub item_count: u32,
    pub items_per_page: u32,
    pub total_pages: u32,
    pub current_page: u32,
}

impl CollectionMeta {
    pub fn from_page<T>(result: &PagedResult<T>) -> Self {
        Self {
            total_items: result.total,
            item_count: result.items.len() as u32,
            items_per_page: result.limit,
            total_pages: result.total_pages(),
            current_page: result.page,
        }
    }
}

/// 列表链接块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLinks {
    pub self_link: String,
    /// 始终指向 page + 1，不按总页数封顶
    pub next: String,
    /// 第 1 页没有上一页
    pub previous: Option<String>,
    pub first: String,
    pub last: String,
}

impl CollectionLinks {
    pub fn for_page(pagination: &Pagination, total_pages: u32) -> Self {
        let page_url = |page: u32| format!("/products?page={}&limit={}", page, pagination.limit);
        Self {
            self_link: page_url(pagination.page),
            next: page_url(pagination.page + 1),
            previous: (pagination.page > 1).then(|| page_url(pagination.page - 1)),
            first: page_url(1),
            last: page_url(total_pages),
        }
    }
}

/// 单资源响应
#[derive(Debug, Clone)]
pub struct ProductEnvelope {
    pub meta: ResourceMeta,
    pub data: Product,
    pub links: ResourceLinks,
}

impl ProductEnvelope {
    pub fn new(meta: ResourceMeta, data: Product) -> Self {
        let links = ResourceLinks::for_product(data.id);
        Self { meta, data, links }
    }
}

/// 列表响应
#[derive(Debug, Clone)]
pub struct ProductListEnvelope {
    pub meta: CollectionMeta,
    pub data: Vec<Product>,
    pub links: CollectionLinks,
}

impl ProductListEnvelope {
    pub fn new(result: PagedResult<Product>) -> Self {
        let meta = CollectionMeta::from_page(&result);
        let pagination = Pagination::new(result.page, result.limit);
        let links = CollectionLinks::for_page(&pagination, meta.total_pages);
        Self {
            meta,
            data: result.items,
            links,
        }
    }
}
