//! 사용자 관련 DTO
//!
//! - 요청: [`RegisterRequest`], [`LoginRequest`], [`UpdateRoleRequest`], [`OAuthCallbackQuery`]
//! - 응답: [`AuthResponse`], [`RoleUpdatedResponse`], [`MeResponse`]

pub mod request;
pub mod response;

// Re-exports for convenience
pub use request::*;
pub use response::*;
