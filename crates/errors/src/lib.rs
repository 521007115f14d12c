//! vela-errors - 统一错误处理
//!
//! 每个失败都同时携带 gRPC 状态码和 HTTP 风格的状态提示，
//! 由调度方负责映射为传输层错误响应。

use thiserror::Error;
use tonic::metadata::MetadataValue;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed dependency: {0}")]
    FailedDependency(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn failed_dependency(msg: impl Into<String>) -> Self {
        Self::FailedDependency(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 转换为 HTTP 状态码提示
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::FailedDependency(_) => 502,
            Self::Database(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// 转换为 gRPC 状态码
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Self::NotFound(_) => tonic::Code::NotFound,
            Self::Validation(_) => tonic::Code::InvalidArgument,
            Self::FailedDependency(_) => tonic::Code::Unavailable,
            Self::Database(_) => tonic::Code::Internal,
            Self::Internal(_) => tonic::Code::Internal,
        }
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        let mut status = tonic::Status::new(err.grpc_code(), err.to_string());
        // HTTP 状态提示随响应元数据一起返回
        if let Ok(hint) = MetadataValue::try_from(err.status_code().to_string()) {
            status.metadata_mut().insert("x-http-code", hint);
        }
        status
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
