//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tonic::transport::server::Router;
use tracing::{error, info};
use vela_config::AppConfig;
use vela_errors::{AppError, AppResult};

use crate::health::HealthServer;
use crate::infrastructure::Infrastructure;
use crate::metrics::{MetricsRecorder, PoolMetricsCollector};
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 gRPC 服务
///
/// 这是所有微服务的统一入口点。它负责：
/// 1. 加载配置
/// 2. 初始化运行时（日志、追踪）
/// 3. 建立基础设施资源（数据库连接池，带重试）
/// 4. 启动健康检查 HTTP 服务器（gRPC 端口 + 1000）
/// 5. 启动连接池 metrics 采集器
/// 6. 调用调用方提供的闭包构建 gRPC 服务
/// 7. 启动服务器并处理 graceful shutdown
///
/// 连接池在进程内只建立一次，并且在每条退出路径上（包括
/// 构建或监听失败）都会被关闭。
pub async fn run_server<F, Fut>(
    config_dir: &str,
    server_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure, Server) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    // 3. 初始化 Metrics 记录器
    let metrics = Arc::new(MetricsRecorder::new());

    // 4. 建立基础设施（带重试）
    let infra = Infrastructure::from_config(config.clone()).await?;

    // 5. 启动健康检查 HTTP 服务器（gRPC 端口 + 1000）
    let health_port = config.server.port + 1000;
    let health_server = HealthServer::new(infra.clone(), metrics.clone(), health_port);
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve().await {
            error!("Health server error: {}", e);
        }
    });

    // 6. 启动连接池 metrics 采集器
    let collector_handle = PoolMetricsCollector::new(infra.clone()).start();

    // 7. 构建服务地址
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // 8. 构建并启动 gRPC 服务器
    let result = {
        let infra = infra.clone();
        async move {
            let router = server_builder(infra, Server::builder()).await?;

            info!(%addr, "gRPC server starting");

            router
                .serve_with_shutdown(addr, shutdown_signal())
                .await
                .map_err(|e| AppError::internal(format!("gRPC server error: {}", e)))
        }
    }
    .await;

    // 9. 清理：无论服务器以何种方式退出都释放资源
    health_handle.abort();
    collector_handle.abort();
    infra.close().await;

    info!("Service stopped");

    result?;
    Ok(())
}
