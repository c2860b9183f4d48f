//! Configuration Types
//!
//! 每个字段都可由 `ROSTER_{SECTION}__{FIELD}` 环境变量覆盖，
//! 例如 `ROSTER_DATABASE__PATH=/var/lib/roster/users.db`。

use std::str::FromStr;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址（`ROSTER_SERVER__HOST`）
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口（`ROSTER_SERVER__PORT`），不能为 0
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite 文件路径（`ROSTER_DATABASE__PATH`），父目录在启动时创建
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 连接池上限（`ROSTER_DATABASE__MAX_CONNECTIONS`）
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/roster.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// sqlx 连接串，`mode=rwc` 在文件不存在时创建
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别（`ROSTER_LOG__LEVEL`）：off / error / warn / info / debug / trace
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 输出 JSON 行（`ROSTER_LOG__JSON`），便于日志采集
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LogConfig {
    /// 解析配置的日志级别
    pub fn level_filter(&self) -> Result<LevelFilter, String> {
        LevelFilter::from_str(self.level.trim())
            .map_err(|_| format!("Unknown log level '{}'", self.level))
    }

    /// `RUST_LOG` 未设置时使用的过滤指令
    ///
    /// 应用自身与全局使用同一级别，HTTP 访问日志固定为 debug。
    pub fn filter_directive(&self) -> String {
        let level = self
            .level_filter()
            .map(|level| level.to_string().to_lowercase())
            .unwrap_or_else(|_| default_log_level());
        format!("{level},roster={level},tower_http=debug")
    }
}
