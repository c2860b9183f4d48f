//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::user::{Email, User, UserName};
use crate::infrastructure::http::error::Fault;

// ============================================================================
// 请求体读取
// ============================================================================

/// 单个字段的读取结果
#[derive(Debug, Clone, PartialEq)]
enum Field<T> {
    /// 未提供或为 null
    Missing,
    Present(T),
    /// 类型不符，违规已记录
    Rejected,
}

impl<T> Field<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Missing | Field::Rejected => None,
        }
    }
}

/// 按白名单读取 JSON 请求体
///
/// 未声明的属性与类型错误都记为违规，而不是交给反序列化器报错。
struct FieldReader {
    fields: Map<String, Value>,
    violations: Vec<String>,
}

impl FieldReader {
    fn new(body: Value, allowed: &[&str]) -> Self {
        let mut violations = Vec::new();
        let fields = match body {
            Value::Object(fields) => fields,
            Value::Null => Map::new(),
            _ => {
                violations.push("request body must be a JSON object".to_string());
                Map::new()
            }
        };

        violations.extend(
            fields
                .keys()
                .filter(|key| !allowed.contains(&key.as_str()))
                .map(|key| format!("property {key} should not exist")),
        );

        Self { fields, violations }
    }

    fn string(&mut self, name: &str) -> Field<String> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Field::Missing,
            Some(Value::String(value)) => Field::Present(value.clone()),
            Some(_) => {
                self.violations.push(format!("{name} must be a string"));
                Field::Rejected
            }
        }
    }

    fn boolean(&mut self, name: &str) -> Field<bool> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Field::Missing,
            Some(Value::Bool(value)) => Field::Present(*value),
            Some(_) => {
                self.violations.push(format!("{name} must be a boolean value"));
                Field::Rejected
            }
        }
    }
}

/// 请求体本身有违规时，把可读字段的领域校验结果一并报告
fn domain_violations(email: &Field<String>, name: &Field<String>, required: bool) -> Vec<String> {
    let mut violations = Vec::new();

    match email {
        Field::Present(raw) => violations.extend(Email::parse(raw.as_str()).err().map(str::to_string)),
        Field::Missing if required => violations.extend(Email::parse("").err().map(str::to_string)),
        _ => {}
    }
    match name {
        Field::Present(raw) => violations.extend(UserName::parse(raw.as_str()).err().map(str::to_string)),
        Field::Missing if required => violations.extend(UserName::parse("").err().map(str::to_string)),
        _ => {}
    }

    violations
}

// ============================================================================
// User DTOs
// ============================================================================

/// 创建用户请求
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

impl CreateUserRequest {
    pub fn from_json(body: Value) -> Result<Self, Fault> {
        let mut reader = FieldReader::new(body, &["email", "name"]);
        let email = reader.string("email");
        let name = reader.string("name");

        if !reader.violations.is_empty() {
            let mut violations = domain_violations(&email, &name, true);
            violations.append(&mut reader.violations);
            return Err(Fault::validation(violations));
        }

        Ok(Self {
            email: email.into_option().unwrap_or_default(),
            name: name.into_option().unwrap_or_default(),
        })
    }
}

/// 更新用户请求，所有字段可选
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn from_json(body: Value) -> Result<Self, Fault> {
        let mut reader = FieldReader::new(body, &["email", "name", "isActive"]);
        let email = reader.string("email");
        let name = reader.string("name");
        let is_active = reader.boolean("isActive");

        if !reader.violations.is_empty() {
            let mut violations = domain_violations(&email, &name, false);
            violations.append(&mut reader.violations);
            return Err(Fault::validation(violations));
        }

        Ok(Self {
            email: email.into_option(),
            name: name.into_option(),
            is_active: is_active.into_option(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            is_active: user.is_active(),
        }
    }
}
