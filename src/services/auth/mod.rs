//! 인증 및 보안 서비스 모듈
//!
//! 패스워드 해싱, JWT 발급/검증, Google OAuth 2.0 로그인과 계정 연결을 담당합니다.
//!
//! # Security
//!
//! - bcrypt cost 고정 (`PasswordConfig::BCRYPT_COST`)
//! - HMAC 계열 서명만 허용, `none`과 비대칭 알고리즘 거부
//! - 토큰 검증 실패 원인은 외부에 노출하지 않음
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenService, GoogleAuthService};
//!
//! let token = state.tokens.issue(&user)?;
//! let claims = state.tokens.validate(&token)?;
//!
//! let (user, token) = state.google.authenticate_with_code(code).await?;
//! ```

pub mod password_service;
pub mod token_service;
pub mod google_auth_service;
pub mod identity_service;

pub use google_auth_service::*;
pub use identity_service::*;
pub use password_service::*;
pub use token_service::*;
