//! Constraint Detail Parsing
//!
//! 从存储引擎的自由文本错误描述中提取字段名。
//! 描述格式随驱动与版本变化，解析失败是预期情况，调用方需自行回退。

use regex::Regex;
use std::sync::LazyLock;

/// PostgreSQL: `Key (email, name)=(a@b.com, Ada) already exists.`
static PARENTHESIZED_FIELDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("parenthesized pattern is a valid regex"));

/// SQLite: `UNIQUE constraint failed: users.email, users.name`
static SQLITE_CONSTRAINT_FIELDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:UNIQUE|NOT NULL) constraint failed: (.+)$")
        .expect("sqlite constraint pattern is a valid regex")
});

/// PostgreSQL: `null value in column "name" of relation "users" violates not-null constraint`
static QUOTED_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"column "([^"]+)""#).expect("quoted column pattern is a valid regex"));

/// 提取唯一约束涉及的字段名
///
/// 返回 `None` 表示描述不符合任何已知格式。
pub fn constrained_fields(detail: &str) -> Option<Vec<String>> {
    if let Some(fragment) = PARENTHESIZED_FIELDS
        .captures(detail)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    {
        return split_field_list(fragment, |name| name);
    }

    SQLITE_CONSTRAINT_FIELDS
        .captures(detail.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| split_field_list(m.as_str(), strip_table_prefix))
}

/// 提取非空约束涉及的列名
pub fn not_null_column(detail: &str) -> Option<String> {
    if let Some(column) = QUOTED_COLUMN.captures(detail).and_then(|caps| caps.get(1)) {
        return Some(column.as_str().to_string());
    }

    SQLITE_CONSTRAINT_FIELDS
        .captures(detail.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| split_field_list(m.as_str(), strip_table_prefix))
        .and_then(|fields| fields.into_iter().next())
}

/// 首字母大写，其余保持不变
pub fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 以 " and " 连接字段名
pub fn join_field_names(fields: &[String]) -> String {
    fields.join(" and ")
}

fn split_field_list(fragment: &str, normalize: impl Fn(&str) -> &str) -> Option<Vec<String>> {
    let fields: Vec<String> = fragment
        .split(',')
        .map(|name| normalize(name.trim()).to_string())
        .filter(|name| !name.is_empty())
        .collect();

    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

fn strip_table_prefix(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
