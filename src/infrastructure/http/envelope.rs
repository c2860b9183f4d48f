//! Response Envelope
//!
//! 成功与失败响应共用同一外壳：
//! `{ success, statusCode, timestamp, path, data | message }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::error::Fault;

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// 统一响应信封
///
/// 不变量:
/// - `status_code` 即实际写出的 HTTP 状态码
/// - `success` 为 true 当且仅当 body 为 `Data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status_code: StatusCode,
    pub timestamp: String,
    pub path: String,
    #[serde(flatten)]
    pub body: EnvelopeBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeBody {
    Data(Value),
    Message(String),
}

impl ResponseEnvelope {
    pub(crate) fn failure(
        status: StatusCode,
        message: String,
        path: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            success: false,
            status_code: status,
            timestamp: format_timestamp(now),
            path: path.to_string(),
            body: EnvelopeBody::Message(message),
        }
    }

    fn success(status: StatusCode, data: Value, path: &str, now: DateTime<Utc>) -> Self {
        Self {
            success: true,
            status_code: status,
            timestamp: format_timestamp(now),
            path: path.to_string(),
            body: EnvelopeBody::Data(data),
        }
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// ISO-8601，毫秒精度，`Z` 结尾
fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 成功结果编码器
pub struct ResultEncoder;

impl ResultEncoder {
    pub fn encode(data: Value, status: StatusCode, path: &str, now: DateTime<Utc>) -> ResponseEnvelope {
        ResponseEnvelope::success(status, data, path, now)
    }
}

/// 已序列化、等待套信封的成功结果（响应扩展）
#[derive(Debug, Clone)]
pub struct EncodedResult {
    pub status: StatusCode,
    pub data: Value,
}

/// Handler 成功返回值
///
/// 默认 200，可通过 [`Success::created`] 等指定其他状态码。
#[derive(Debug)]
pub struct Success<T: Serialize> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> Success<T> {
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }

    pub fn with_status(status: StatusCode, data: T) -> Self {
        Self { status, data }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        match serde_json::to_value(&self.data) {
            Ok(data) => {
                let mut response = self.status.into_response();
                response.extensions_mut().insert(EncodedResult {
                    status: self.status,
                    data,
                });
                response
            }
            Err(e) => Fault::unknown(format!("Failed to serialize response: {e}")).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ResultEncoder::encode(json!({ "id": 1 }), StatusCode::OK, "/users/1", fixed_now());
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({
                "success": true,
                "statusCode": 200,
                "timestamp": "2024-05-01T12:30:00.000Z",
                "path": "/users/1",
                "data": { "id": 1 },
            })
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = ResponseEnvelope::failure(
            StatusCode::NOT_FOUND,
            "User not found".to_string(),
            "/users/9",
            fixed_now(),
        );
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["statusCode"], 404);
        assert_eq!(value["message"], "User not found");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_envelope_round_trips_through_json() {
        let envelope = ResultEncoder::encode(json!([1, 2]), StatusCode::CREATED, "/users", fixed_now());
        let text = serde_json::to_string(&envelope).unwrap();
        let parsed: ResponseEnvelope = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn test_envelope_response_uses_its_status() {
        let envelope = ResultEncoder::encode(json!(null), StatusCode::CREATED, "/", fixed_now());
        assert_eq!(envelope.into_response().status(), StatusCode::CREATED);
    }

    #[test]
    fn test_success_response_carries_encoded_result() {
        let response = Success::created(json!({ "id": 1 })).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let encoded = response.extensions().get::<EncodedResult>().unwrap();
        assert_eq!(encoded.data, json!({ "id": 1 }));
    }
}
