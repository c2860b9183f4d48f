//! Fallback Handler
//!
//! 未匹配任何路由的请求

use axum::http::{Method, Uri};

use crate::infrastructure::http::error::Fault;

pub async fn route_not_found(method: Method, uri: Uri) -> Fault {
    Fault::not_found(format!("Cannot {} {}", method, uri.path()))
}
