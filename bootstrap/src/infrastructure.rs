//! 基础设施资源管理
//!
//! 微服务共享的基础设施资源：进程级别的数据库连接池，
//! 启动时建立一次，优雅关闭时释放一次

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;
use vela_adapter_postgres::{PostgresConfig, check_connection, create_pool};
use vela_config::AppConfig;
use vela_errors::AppResult;

use crate::retry::{RetryConfig, with_retry};

/// 连接池状态
#[derive(Debug, Clone)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: u32,
    pub active: u32,
}

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 连接池
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;

        check_connection(&postgres_pool).await?;
        info!(
            max_connections = config.database.max_connections,
            "Connected to the database"
        );

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 获取服务器配置
    pub fn server_config(&self) -> &vela_config::ServerConfig {
        &self.config.server
    }

    /// 获取 PostgreSQL 连接池状态
    pub fn pool_status(&self) -> PoolStatus {
        let size = self.postgres_pool.size();
        let idle = self.postgres_pool.num_idle() as u32;
        PoolStatus {
            size,
            idle,
            active: size.saturating_sub(idle),
        }
    }

    /// 检查数据库连接是否可用
    pub async fn check_postgres_connection(&self) -> bool {
        check_connection(&self.postgres_pool).await.is_ok()
    }

    /// 释放基础设施资源
    ///
    /// 在所有退出路径上都必须调用（见 starter::run_server）
    pub async fn close(&self) {
        self.postgres_pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}
