//! Domain <-> proto 转换

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use vela_common::Pagination;
use vela_errors::{AppError, AppResult};

use crate::common;
use crate::domain::{Product, ProductEnvelope, ProductListEnvelope};
use crate::proto;

/// 线上的 double 转为定点单价
///
/// NaN / 无穷大在这里拒绝，精度校验在命令层
pub fn parse_price(value: f64) -> AppResult<Decimal> {
    Decimal::from_f64(value)
        .ok_or_else(|| AppError::validation(format!("price {} is not a valid number", value)))
}

/// 解析分页参数，缺省 page=1, limit=10
pub fn parse_pagination(request: Option<common::v1::PaginationRequest>) -> AppResult<Pagination> {
    let mut pagination = Pagination::default();

    if let Some(req) = request {
        if let Some(page) = req.page {
            if page < 1 {
                return Err(AppError::validation("page must be a positive integer"));
            }
            pagination.page = page as u32;
        }
        if let Some(limit) = req.limit {
            if limit < 1 {
                return Err(AppError::validation("limit must be a positive integer"));
            }
            pagination.limit = limit as u32;
        }
    }

    Ok(pagination)
}

pub fn product_to_proto(product: &Product) -> proto::Product {
    proto::Product {
        id: product.id.0,
        name: product.name.clone(),
        price: product.price.to_f64().unwrap_or_default(),
        description: product.description.clone(),
        available: product.available,
    }
}

pub fn envelope_to_proto(envelope: ProductEnvelope) -> proto::ProductResponse {
    proto::ProductResponse {
        meta: Some(proto::ProductMeta {
            is_created: envelope.meta.is_created,
            is_found: envelope.meta.is_found,
            is_updated: envelope.meta.is_updated,
            is_deleted: envelope.meta.is_deleted,
        }),
        data: Some(product_to_proto(&envelope.data)),
        links: Some(common::v1::ResourceLinks {
            self_: envelope.links.self_link,
            create: envelope.links.create,
            update: envelope.links.update,
            delete: envelope.links.delete,
        }),
    }
}

pub fn list_envelope_to_proto(envelope: ProductListEnvelope) -> proto::ProductListResponse {
    proto::ProductListResponse {
        meta: Some(common::v1::PaginationMeta {
            total_items: envelope.meta.total_items as i64,
            item_count: envelope.meta.item_count as i32,
            items_per_page: envelope.meta.items_per_page as i32,
            total_pages: envelope.meta.total_pages as i32,
            current_page: envelope.meta.current_page as i32,
        }),
        data: envelope.data.iter().map(product_to_proto).collect(),
        links: Some(common::v1::CollectionLinks {
            self_: envelope.links.self_link,
            next: envelope.links.next,
            previous: envelope.links.previous,
            first: envelope.links.first,
            last: envelope.links.last,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_roundtrip() {
        let price = parse_price(9.99).unwrap();
        assert_eq!(price, "9.99".parse::<Decimal>().unwrap());
        assert_eq!(price.to_f64().unwrap(), 9.99);
    }

    #[test]
    fn test_parse_price_rejects_nan() {
        assert!(parse_price(f64::NAN).is_err());
        assert!(parse_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_pagination_defaults() {
        let pagination = parse_pagination(None).unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 10);

        let pagination = parse_pagination(Some(common::v1::PaginationRequest {
            page: None,
            limit: Some(25),
        }))
        .unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 25);
    }

    #[test]
    fn test_parse_pagination_rejects_non_positive() {
        let result = parse_pagination(Some(common::v1::PaginationRequest {
            page: Some(0),
            limit: None,
        }));
        assert!(result.is_err());

        let result = parse_pagination(Some(common::v1::PaginationRequest {
            page: None,
            limit: Some(-1),
        }));
        assert!(result.is_err());
    }
}
