//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <token>` 헤더 추출 및 형식 검사
//! - 토큰 서명/만료 검증
//! - 인증 주체를 request extension에 저장
//!
//! 요청마다 토큰을 다시 검증하며 캐싱하지 않습니다.
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new().service(
//!     web::resource("/auth/me")
//!         .wrap(AuthMiddleware::new(state.tokens.clone()))
//!         .route(web::get().to(me)),
//! )
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
