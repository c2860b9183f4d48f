//! HTTP Middleware
//!
//! 响应信封中间件：在启动时统一注册，负责把 handler 的结果
//! （[`EncodedResult`] 或 [`Fault`]）结合请求路径包装成最终信封，并记录错误日志。

use axum::{
    extract::{OriginalUri, Request},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::classifier::ErrorClassifier;
use super::envelope::{EncodedResult, ResponseEnvelope, ResultEncoder};
use super::error::Fault;

/// 响应信封中间件
///
/// 未被 handler 标记的 4xx/5xx 响应（例如框架返回的 405）同样被包装为失败信封。
pub async fn response_envelope_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request_path(&request);

    let mut response = next.run(request).await;
    let now = Utc::now();

    if let Some(fault) = response.extensions_mut().remove::<Fault>() {
        let envelope = ErrorClassifier::envelope(&fault, &path, now);
        log_fault(&method, &path, &envelope, &fault);
        return rebuild(response.headers(), envelope);
    }

    if let Some(result) = response.extensions_mut().remove::<EncodedResult>() {
        let envelope = ResultEncoder::encode(result.data, result.status, &path, now);
        return rebuild(response.headers(), envelope);
    }

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let fault = Fault::structured(status, status.canonical_reason().unwrap_or("Error"));
        let envelope = ErrorClassifier::envelope(&fault, &path, now);
        log_fault(&method, &path, &envelope, &fault);
        return rebuild(response.headers(), envelope);
    }

    response
}

/// 请求路径（含查询串），优先使用嵌套路由前的原始 URI
fn request_path(request: &Request) -> String {
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or_else(|| request.uri());

    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// 以信封作为新 body，保留原响应中与 body 无关的头（如 `Allow`）
fn rebuild(original: &HeaderMap, envelope: ResponseEnvelope) -> Response {
    let mut response = envelope.into_response();
    for (name, value) in original {
        if name == header::CONTENT_TYPE || name == header::CONTENT_LENGTH {
            continue;
        }
        response.headers_mut().append(name.clone(), value.clone());
    }
    response
}

fn log_fault(method: &axum::http::Method, path: &str, envelope: &ResponseEnvelope, fault: &Fault) {
    let status = envelope.status_code;
    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %path,
            status = %status.as_u16(),
            detail = %fault.server_detail(),
            "HTTP server error"
        );
    } else {
        tracing::warn!(
            method = %method,
            uri = %path,
            status = %status.as_u16(),
            detail = %fault.server_detail(),
            "HTTP client error"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::envelope::{EnvelopeBody, Success};
    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use serde_json::json;
    use tower::util::ServiceExt;

    async fn ok_handler() -> Success<serde_json::Value> {
        Success::ok(json!({ "id": 1 }))
    }

    async fn fault_handler() -> Result<Success<()>, Fault> {
        Err(Fault::unknown("database exploded"))
    }

    async fn plain_handler() -> &'static str {
        "OK"
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/ok", get(ok_handler))
            .route("/fault", get(fault_handler))
            .route("/plain", get(plain_handler))
            .layer(axum::middleware::from_fn(response_envelope_middleware))
    }

    async fn send(uri: &str, method: &str) -> (StatusCode, ResponseEnvelope) {
        let request = HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = create_test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_success_is_wrapped_with_path() {
        let (status, envelope) = send("/ok?verbose=1", "GET").await;

        assert_eq!(status, StatusCode::OK);
        assert!(envelope.success);
        assert_eq!(envelope.status_code, status);
        assert_eq!(envelope.path, "/ok?verbose=1");
        assert_eq!(envelope.body, EnvelopeBody::Data(json!({ "id": 1 })));
    }

    #[tokio::test]
    async fn test_fault_is_classified_without_detail() {
        let (status, envelope) = send("/fault", "GET").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!envelope.success);
        assert_eq!(envelope.status_code, status);
        assert_eq!(
            envelope.body,
            EnvelopeBody::Message("Something went wrong. Please try again later.".to_string())
        );
    }

    #[tokio::test]
    async fn test_framework_rejection_is_wrapped() {
        let (status, envelope) = send("/ok", "DELETE").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(envelope.status_code, status);
        assert_eq!(
            envelope.body,
            EnvelopeBody::Message("Method Not Allowed".to_string())
        );
    }

    #[tokio::test]
    async fn test_unmarked_success_passes_through() {
        let request = HttpRequest::builder()
            .uri("/plain")
            .body(Body::empty())
            .unwrap();
        let response = create_test_router().oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }
}
