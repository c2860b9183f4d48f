//! User Context - 用户限界上下文
//!
//! 职责:
//! - 用户实体
//! - 输入校验（邮箱、名称）
//! - 部分更新合并

mod entity;
mod errors;
mod value_objects;

pub use entity::{NewUser, User, UserPatch};
pub use errors::UserError;
pub use value_objects::{Email, UserId, UserName};
