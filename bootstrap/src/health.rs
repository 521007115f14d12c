//! 健康检查模块
//!
//! 提供 /health、/ready 和 /metrics 端点

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::metrics::MetricsRecorder;

/// 组件健康状态
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "healthy".to_string(),
            message: None,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "unhealthy".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 健康检查状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub checks: Vec<ComponentHealth>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            checks: vec![],
        }
    }

    pub fn add_check(&mut self, check: ComponentHealth) {
        if check.status != "healthy" {
            self.status = "unhealthy".to_string();
        }
        self.checks.push(check);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Clone)]
struct HealthState {
    infra: Infrastructure,
    metrics: Arc<MetricsRecorder>,
}

/// 健康检查 HTTP 服务器
///
/// 运行在 gRPC 端口 + 1000 上
pub struct HealthServer {
    infra: Infrastructure,
    metrics: Arc<MetricsRecorder>,
    port: u16,
}

impl HealthServer {
    pub fn new(infra: Infrastructure, metrics: Arc<MetricsRecorder>, port: u16) -> Self {
        Self {
            infra,
            metrics,
            port,
        }
    }

    pub async fn serve(self) -> std::io::Result<()> {
        let state = HealthState {
            infra: self.infra,
            metrics: self.metrics,
        };

        let app = Router::new()
            .route("/health", get(liveness))
            .route("/ready", get(readiness))
            .route("/metrics", get(render_metrics))
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "Health server starting");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await
    }
}

/// 存活检查：只确认进程在运行
async fn liveness() -> impl IntoResponse {
    Json(HealthStatus::healthy())
}

/// 就绪检查：确认依赖可用
async fn readiness(State(state): State<HealthState>) -> impl IntoResponse {
    let mut status = HealthStatus::healthy();

    if state.infra.check_postgres_connection().await {
        status.add_check(ComponentHealth::healthy("postgres"));
    } else {
        status.add_check(ComponentHealth::unhealthy(
            "postgres",
            "Connection check failed",
        ));
    }

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}

async fn render_metrics(State(state): State<HealthState>) -> impl IntoResponse {
    state.metrics.render()
}
