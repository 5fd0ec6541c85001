//! 사용자 관리 서비스 모듈
//!
//! 회원가입, 로그인, 역할 지정, 내 정보 조회를 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (블로킹 스레드 풀에서 실행)
//! - 이메일 중복 방지 (저장소 고유 인덱스)
//! - 로그인 실패 사유 비노출
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let response = state.users.register(request).await?;
//! let me = state.users.find_by_id(user.user_id).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
