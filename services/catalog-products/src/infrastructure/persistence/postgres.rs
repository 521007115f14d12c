//! PostgreSQL repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use vela_common::Pagination;
use vela_errors::{AppError, AppResult};

use crate::domain::{NewProduct, Product, ProductId, ProductPatch, ProductRepository};

use super::rows::ProductRow;

const PRODUCT_COLUMNS: &str = "id, name, price, description, available, created_at, updated_at";

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn count_available(&self) -> AppResult<u64> {
        let total: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE available = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to count products: {}", e)))?;

        Ok(total.0 as u64)
    }

    async fn list_available(&self, pagination: &Pagination) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE available = TRUE
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(pagination.limit as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_available_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE id = $1 AND available = TRUE
            "#
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find product: {}", e)))?;

        Ok(row.map(Product::from))
    }

    async fn insert(&self, product: NewProduct) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (name, price, description, available)
            VALUES ($1, $2, $3, $4)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.available)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert product: {}", e)))?;

        Ok(row.into())
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> AppResult<Product> {
        // 未提供的字段保持原值，主键不在可更新字段集里
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                available = COALESCE($5, available),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.0)
        .bind(patch.name)
        .bind(patch.price)
        .bind(patch.description)
        .bind(patch.available)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update product: {}", e)))?;

        row.map(Product::from)
            .ok_or_else(|| AppError::not_found(format!("Product with ID {} not found", id)))
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>> {
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE id = ANY($1)
            ORDER BY id
            "#
        ))
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find products by ids: {}", e)))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
