//! Infrastructure Layer - 基础设施层
//!
//! 包含：
//! - http: RESTful API、响应信封与错误分类
//! - persistence: SQLite 持久化

pub mod http;
pub mod persistence;
