//! HTTP Error Handling
//!
//! 请求处理过程中的所有失败都在传输边界被转换为 [`Fault`]，
//! 再由 [`ErrorClassifier`](super::classifier::ErrorClassifier) 统一分类。

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};

use crate::application::{ApplicationError, RepositoryError};

/// 上游显式给出的错误载荷
#[derive(Debug, Clone, PartialEq)]
pub enum FaultPayload {
    Text(String),
    /// 结构化载荷，取其 `message` 字段作为对外消息
    Object(Value),
}

/// 请求处理失败
#[derive(Debug, Clone, PartialEq)]
pub enum Fault {
    /// 已带有明确状态码与载荷（校验失败、资源不存在、路由拒绝等）
    Structured {
        status: StatusCode,
        payload: FaultPayload,
    },

    /// 存储引擎报告的错误
    Storage {
        code: String,
        detail: String,
        column: Option<String>,
    },

    /// 无法归类的运行时错误，detail 仅用于服务端日志
    Unknown { detail: String },
}

impl Fault {
    pub fn structured(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Structured {
            status,
            payload: FaultPayload::Text(message.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::structured(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::structured(StatusCode::BAD_REQUEST, message)
    }

    /// 多条校验违规，载荷形如 `{"message": [...], "error": "Bad Request"}`
    pub fn validation(violations: Vec<String>) -> Self {
        Self::Structured {
            status: StatusCode::BAD_REQUEST,
            payload: FaultPayload::Object(json!({
                "message": violations,
                "error": "Bad Request",
            })),
        }
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self::Unknown {
            detail: detail.into(),
        }
    }

    /// 仅写入日志的内部描述
    pub fn server_detail(&self) -> String {
        match self {
            Fault::Structured { payload, .. } => match payload {
                FaultPayload::Text(text) => text.clone(),
                FaultPayload::Object(value) => value.to_string(),
            },
            Fault::Storage { code, detail, .. } => format!("[{code}] {detail}"),
            Fault::Unknown { detail } => detail.clone(),
        }
    }
}

/// 只写入状态码，并把 Fault 放入响应扩展；
/// 信封由 `response_envelope_middleware` 结合请求路径生成
impl IntoResponse for Fault {
    fn into_response(self) -> Response {
        let status = super::classifier::ErrorClassifier::classify(&self).status;
        let mut response = status.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl From<RepositoryError> for Fault {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Database {
                code,
                detail,
                column,
            } => Fault::Storage {
                code,
                detail,
                column,
            },
            RepositoryError::NotFound(what) => {
                tracing::debug!(%what, "Repository row not found");
                Fault::not_found("Resource not found")
            }
            other => Fault::unknown(other.to_string()),
        }
    }
}

impl From<ApplicationError> for Fault {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { .. } => Fault::not_found(e.to_string()),
            ApplicationError::ValidationError(violations) => Fault::validation(violations),
            ApplicationError::RepositoryError(err) => Fault::from(err),
        }
    }
}

impl From<JsonRejection> for Fault {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
            ref other => other.status(),
        };
        Fault::structured(status, rejection.body_text())
    }
}

impl From<PathRejection> for Fault {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Path parameter rejected");
        Fault::bad_request("Validation failed (numeric string is expected)")
    }
}
