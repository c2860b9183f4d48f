//! HTTP Layer - RESTful API
//!
//! 响应规范化：
//! - envelope: 成功信封与 ResultEncoder
//! - classifier: ErrorClassifier，把 Fault 映射为对外错误契约
//! - constraint: 存储引擎约束错误描述解析
//! - middleware: 统一注册的信封中间件

pub mod classifier;
pub mod constraint;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use classifier::{ClassifiedError, ErrorClassifier, StorageErrorKind};
pub use envelope::{EnvelopeBody, ResponseEnvelope, ResultEncoder, Success};
pub use error::{Fault, FaultPayload};
pub use routes::create_routes;
pub use server::{build_router, HttpServer, ServerConfig};
pub use state::AppState;
