//! Ping Handler
//!
//! 健康检查

use serde::Serialize;

use crate::infrastructure::http::envelope::Success;

/// Ping 响应
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping() -> Success<PingResponse> {
    Success::ok(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
