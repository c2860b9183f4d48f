//! Error Classifier
//!
//! 把任意 [`Fault`] 映射为稳定、可对外暴露的错误契约：状态码 + 扁平字符串消息。
//! 分类本身是纯函数，不会失败，也不会泄露存储引擎的原始描述。

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::constraint::{capitalize, constrained_fields, join_field_names, not_null_column};
use super::envelope::ResponseEnvelope;
use super::error::{Fault, FaultPayload};

/// 对外消息
pub mod messages {
    pub const UNKNOWN_FAULT: &str = "Something went wrong. Please try again later.";
    pub const STORAGE_FAULT: &str = "A server error occurred. Please try again later.";
    pub const ALREADY_EXISTS: &str = "This item already exists.";
    pub const IN_USE: &str = "This action cannot be completed because this item is in use elsewhere.";
    pub const INVALID_FORMAT: &str =
        "One or more fields has an invalid format. Please check your input.";
    pub const REQUIRED_FIELD_MISSING: &str = "A required field is missing and cannot be empty.";
}

/// 存储引擎错误类别
///
/// 同时识别 PostgreSQL SQLSTATE 与 SQLite 扩展结果码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    UniqueViolation,
    NotNullViolation,
    ForeignKeyViolation,
    InvalidFormat,
    Other,
}

impl StorageErrorKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            // SQLITE_CONSTRAINT_UNIQUE / SQLITE_CONSTRAINT_PRIMARYKEY
            "23505" | "2067" | "1555" => Self::UniqueViolation,
            // SQLITE_CONSTRAINT_NOTNULL
            "23502" | "1299" => Self::NotNullViolation,
            // SQLITE_CONSTRAINT_FOREIGNKEY
            "23503" | "787" => Self::ForeignKeyViolation,
            // SQLITE_MISMATCH
            // SQLITE_MISMATCH / SQLITE_CONSTRAINT_DATATYPE (STRICT 表)
            "22P02" | "20" | "3091" => Self::InvalidFormat,
            _ => Self::Other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UniqueViolation | Self::ForeignKeyViolation => StatusCode::CONFLICT,
            Self::NotNullViolation | Self::InvalidFormat => StatusCode::BAD_REQUEST,
            Self::Other => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub status: StatusCode,
    pub message: String,
}

impl ClassifiedError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// 错误分类器
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// 按优先级分类：结构化错误 > 存储错误 > 未知错误
    pub fn classify(fault: &Fault) -> ClassifiedError {
        match fault {
            Fault::Structured { status, payload } => {
                ClassifiedError::new(*status, payload_message(*status, payload))
            }
            Fault::Storage {
                code,
                detail,
                column,
            } => classify_storage(code, detail, column.as_deref()),
            Fault::Unknown { .. } => {
                ClassifiedError::new(StatusCode::INTERNAL_SERVER_ERROR, messages::UNKNOWN_FAULT)
            }
        }
    }

    /// 生成失败信封
    pub fn envelope(fault: &Fault, path: &str, now: DateTime<Utc>) -> ResponseEnvelope {
        let classified = Self::classify(fault);
        ResponseEnvelope::failure(classified.status, classified.message, path, now)
    }
}

fn classify_storage(code: &str, detail: &str, column: Option<&str>) -> ClassifiedError {
    let kind = StorageErrorKind::from_code(code);
    let message = match kind {
        StorageErrorKind::UniqueViolation => unique_violation_message(detail),
        StorageErrorKind::NotNullViolation => {
            match column.map(str::to_string).or_else(|| not_null_column(detail)) {
                Some(column) => {
                    format!("The '{column}' field is required and cannot be empty.")
                }
                None => messages::REQUIRED_FIELD_MISSING.to_string(),
            }
        }
        StorageErrorKind::ForeignKeyViolation => messages::IN_USE.to_string(),
        StorageErrorKind::InvalidFormat => messages::INVALID_FORMAT.to_string(),
        StorageErrorKind::Other => messages::STORAGE_FAULT.to_string(),
    };

    ClassifiedError::new(kind.status(), message)
}

fn unique_violation_message(detail: &str) -> String {
    match constrained_fields(detail) {
        Some(fields) if fields.len() > 1 => format!(
            "The combination of values for the {} fields must be unique.",
            join_field_names(&fields)
        ),
        Some(fields) => format!(
            "{} is already taken. Please choose another.",
            capitalize(&fields[0])
        ),
        None => messages::ALREADY_EXISTS.to_string(),
    }
}

/// 结构化载荷归约为扁平字符串
fn payload_message(status: StatusCode, payload: &FaultPayload) -> String {
    let fallback = || status.canonical_reason().unwrap_or("Error").to_string();

    match payload {
        FaultPayload::Text(text) => text.clone(),
        FaultPayload::Object(value) => match value.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Array(items)) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                if parts.is_empty() {
                    fallback()
                } else {
                    parts.join(", ")
                }
            }
            Some(Value::Null) | None => fallback(),
            Some(other) => other.to_string(),
        },
    }
}
