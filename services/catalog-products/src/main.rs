//! catalog-products Service - Products Catalog

use std::sync::Arc;

use tracing::info;
use vela_adapter_postgres::{Migration, MigrationManager};
use vela_bootstrap::{Infrastructure, build_reflection, run_server};
use vela_errors::AppError;

use catalog_products::FILE_DESCRIPTOR_SET;
use catalog_products::api::ProductServiceImpl;
use catalog_products::application::ServiceHandler;
use catalog_products::infrastructure::persistence::PostgresProductRepository;
use catalog_products::proto::product_service_server::ProductServiceServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_server("config", |infra: Infrastructure, mut server| async move {
        info!("Initializing catalog-products Service...");

        let pool = infra.postgres_pool();

        // 应用数据库迁移
        let migrations = vec![Migration::new(
            1,
            "create_products",
            include_str!("../migrations/0001_create_products.sql"),
        )];
        MigrationManager::new(pool.clone()).migrate(&migrations).await?;

        let repo = Arc::new(PostgresProductRepository::new(pool));
        let handler = Arc::new(ServiceHandler::new(repo));
        let service = ProductServiceImpl::new(handler);
        info!("Repository and handler initialized");

        let reflection = build_reflection(&[FILE_DESCRIPTOR_SET])
            .map_err(|e| AppError::internal(format!("Failed to build reflection: {}", e)))?;

        Ok(server
            .add_service(ProductServiceServer::new(service))
            .add_service(reflection))
    })
    .await
}
