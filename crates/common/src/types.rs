//! 通用类型定义

use serde::{Deserialize, Serialize};

/// 分页参数
///
/// page 和 limit 均从 1 开始，缺省值 page=1, limit=10
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// 行偏移量：(page - 1) * limit
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1) as u64) * (self.limit as u64)
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            limit: pagination.limit,
        }
    }

    /// 总页数：ceil(total / limit)
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        ((self.total + self.limit as u64 - 1) / self.limit as u64) as u32
    }
}
