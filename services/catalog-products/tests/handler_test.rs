//! 产品目录服务处理器测试
//!
//! 用内存仓储驱动 ServiceHandler，不依赖真实数据库

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use vela_common::Pagination;
use vela_errors::{AppError, AppResult};

use catalog_products::application::{
    CreateProductCommand, GetProductQuery, ListProductsQuery, RemoveProductCommand,
    ServiceHandler, UpdateProductCommand, ValidateProductsCommand,
};
use catalog_products::domain::{
    NewProduct, Product, ProductId, ProductPatch, ProductRepository,
};

/// 内存仓储，测试用
struct InMemoryProductRepository {
    rows: Mutex<Vec<Product>>,
    next_id: AtomicI32,
}

impl InMemoryProductRepository {
    fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn count_available(&self) -> AppResult<u64> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|p| p.available).count() as u64)
    }

    async fn list_available(&self, pagination: &Pagination) -> AppResult<Vec<Product>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|p| p.available)
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect())
    }

    async fn find_available_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id == id && p.available).cloned())
    }

    async fn insert(&self, product: NewProduct) -> AppResult<Product> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let product = Product {
            id: ProductId(id),
            name: product.name,
            price: product.price,
            description: product.description,
            available: product.available,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> AppResult<Product> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Product with ID {} not found", id)))?;

        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(price) = patch.price {
            row.price = price;
        }
        if let Some(description) = patch.description {
            row.description = Some(description);
        }
        if let Some(available) = patch.available {
            row.available = available;
        }
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

fn handler() -> ServiceHandler {
    ServiceHandler::new(Arc::new(InMemoryProductRepository::new()))
}

fn price(value: &str) -> Decimal {
    value.parse().unwrap()
}

async fn create(handler: &ServiceHandler, name: &str, price_str: &str) -> ProductId {
    let envelope = handler
        .create_product(CreateProductCommand {
            name: name.to_string(),
            price: price(price_str),
            description: None,
            available: None,
        })
        .await
        .expect("create should succeed");
    envelope.data.id
}

#[tokio::test]
async fn test_create_marks_available_and_created() {
    let handler = handler();

    let envelope = handler
        .create_product(CreateProductCommand {
            name: "Keyboard".to_string(),
            price: price("49.90"),
            description: Some("Mechanical".to_string()),
            available: None,
        })
        .await
        .unwrap();

    assert!(envelope.meta.is_created);
    assert!(envelope.data.available);
    assert_eq!(envelope.links.self_link, format!("/products/{}", envelope.data.id));
    assert_eq!(envelope.links.create, "/products");
}

#[tokio::test]
async fn test_create_rejects_invalid_price() {
    let handler = handler();

    let err = handler
        .create_product(CreateProductCommand {
            name: "Keyboard".to_string(),
            price: price("1.23456"),
            description: None,
            available: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_list_respects_limit_and_pagination_math() {
    let handler = handler();
    for i in 0..25 {
        create(&handler, &format!("Product {}", i), "1.00").await;
    }

    let envelope = handler
        .find_all(ListProductsQuery {
            pagination: Pagination::new(1, 10),
        })
        .await
        .unwrap();

    assert_eq!(envelope.data.len(), 10);
    assert_eq!(envelope.meta.item_count, 10);
    assert_eq!(envelope.meta.total_items, 25);
    assert_eq!(envelope.meta.items_per_page, 10);
    assert_eq!(envelope.meta.total_pages, 3);
    assert_eq!(envelope.meta.current_page, 1);
    assert!(envelope.links.previous.is_none());

    let envelope = handler
        .find_all(ListProductsQuery {
            pagination: Pagination::new(3, 10),
        })
        .await
        .unwrap();

    // 最后一页只剩 5 行，而 next 仍然指向 page + 1
    assert_eq!(envelope.meta.item_count, 5);
    assert!(envelope.links.previous.is_some());
    assert_eq!(envelope.links.next, "/products?page=4&limit=10");
    assert_eq!(envelope.links.last, "/products?page=3&limit=10");
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let handler = handler();

    let envelope = handler.find_all(ListProductsQuery::default()).await.unwrap();

    assert_eq!(envelope.meta.total_items, 0);
    assert_eq!(envelope.meta.item_count, 0);
    assert_eq!(envelope.meta.total_pages, 0);
}

#[tokio::test]
async fn test_find_one_round_trip() {
    let handler = handler();
    let id = create(&handler, "A", "9.99").await;

    let envelope = handler.find_one(GetProductQuery { id }).await.unwrap();

    assert!(envelope.meta.is_found);
    assert_eq!(envelope.data.name, "A");
    assert_eq!(envelope.data.price, price("9.99"));
}

#[tokio::test]
async fn test_find_one_missing_raises_not_found() {
    let handler = handler();

    let err = handler
        .find_one(GetProductQuery { id: ProductId(42) })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(err.to_string().contains("42"));
}

#[tokio::test]
async fn test_update_applies_fields_but_never_the_id() {
    let handler = handler();
    let id = create(&handler, "Before", "1.00").await;
    let other = create(&handler, "Other", "2.00").await;

    let envelope = handler
        .update_product(UpdateProductCommand {
            id,
            patch: ProductPatch {
                name: Some("After".to_string()),
                price: Some(price("3.50")),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    assert!(envelope.meta.is_updated);
    assert_eq!(envelope.data.id, id);
    assert_eq!(envelope.data.name, "After");
    assert_eq!(envelope.data.price, price("3.50"));

    // 其他行不受影响
    let untouched = handler.find_one(GetProductQuery { id: other }).await.unwrap();
    assert_eq!(untouched.data.name, "Other");
}

#[tokio::test]
async fn test_update_missing_raises_not_found() {
    let handler = handler();

    let err = handler
        .update_product(UpdateProductCommand {
            id: ProductId(99),
            patch: ProductPatch {
                name: Some("X".to_string()),
                ..Default::default()
            },
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_remove_is_soft_and_second_remove_raises_not_found() {
    let handler = handler();
    let id = create(&handler, "Doomed", "5.00").await;

    let envelope = handler
        .remove_product(RemoveProductCommand { id })
        .await
        .unwrap();
    assert!(envelope.meta.is_deleted);
    assert!(!envelope.data.available);

    // 软删除之后普通读取也拿不到了
    let err = handler.find_one(GetProductQuery { id }).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // 第二次删除不是又一次成功，而是 NotFound
    let err = handler
        .remove_product(RemoveProductCommand { id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_validate_counts_distinct_ids() {
    let handler = handler();
    let existing = create(&handler, "Exists", "1.00").await;

    // [existing, existing, 5]：去重后 {existing, 5}，命中只有 1 个
    let err = handler
        .validate_products(ValidateProductsCommand {
            ids: vec![existing, existing, ProductId(5)],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::FailedDependency(_)));
    assert!(err.to_string().contains('5'));
}

#[tokio::test]
async fn test_validate_ignores_soft_delete_state() {
    let handler = handler();
    let id = create(&handler, "Gone but present", "1.00").await;
    handler
        .remove_product(RemoveProductCommand { id })
        .await
        .unwrap();

    // 软删除的行仍然算存在
    let products = handler
        .validate_products(ValidateProductsCommand { ids: vec![id, id] })
        .await
        .unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, id);
    assert!(!products[0].available);
}

#[tokio::test]
async fn test_validate_empty_id_list() {
    let handler = handler();

    let products = handler
        .validate_products(ValidateProductsCommand { ids: vec![] })
        .await
        .unwrap();

    assert!(products.is_empty());
}
