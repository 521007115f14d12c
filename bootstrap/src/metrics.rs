//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出

use std::time::Duration;

use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::infrastructure::Infrastructure;

/// Metrics 记录器
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("Failed to install Prometheus recorder");

        Self { handle }
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// 连接池指标采集器
///
/// 周期性地把连接池状态写入 gauge
pub struct PoolMetricsCollector {
    infra: Infrastructure,
    interval: Duration,
}

impl PoolMetricsCollector {
    pub fn new(infra: Infrastructure) -> Self {
        Self {
            infra,
            interval: Duration::from_secs(10),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// 启动后台采集任务
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(self.interval).await;

                let status = self.infra.pool_status();
                let labels = [("pool", "postgres".to_string())];
                gauge!("db_pool_connections_total", &labels).set(status.size as f64);
                gauge!("db_pool_connections_idle", &labels).set(status.idle as f64);
                gauge!("db_pool_connections_active", &labels).set(status.active as f64);

                debug!(
                    size = status.size,
                    idle = status.idle,
                    active = status.active,
                    "Pool metrics collected"
                );
            }
        })
    }
}
