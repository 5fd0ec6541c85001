//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 생성자로 의존성을 받아 [`AppState`](crate::core::state::AppState)에서
//! 한 번 조립됩니다. 전역 인스턴스는 없습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, auth::TokenService};
//!
//! let tokens = Arc::new(TokenService::new(&config.jwt)?);
//! let users = UserService::new(store, PasswordHasher::new(), tokens.clone());
//! ```

pub mod users;
pub mod auth;
