//! HTTP Handlers

mod fallback;
mod ping;
mod user;

pub use fallback::*;
pub use ping::*;
pub use user::*;
