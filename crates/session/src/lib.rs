mod config;
mod cookies;
mod identity;
mod jwt;

pub use crate::config::Config as SessionConfig;
pub use crate::cookies::{cookie_value, ResponseCookies, Session};
pub use crate::identity::Identity;
pub use crate::jwt::{Claims, SessionCodec};
