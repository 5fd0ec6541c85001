//! 관광 라이드 예약 인증 서비스 백엔드
//!
//! 관광객과 기사를 위한 인증 및 사용자 관리 서비스입니다.
//! 이메일/패스워드 로그인, Google OAuth 2.0 소셜 로그인, JWT 세션 토큰,
//! 역할별(관광객/기사) 프로필 생성을 제공합니다.
//!
//! # Features
//!
//! - **회원가입**: 사용자와 역할별 프로필을 하나의 작업 단위로 생성
//! - **JWT 인증**: HS256 단일 토큰 기반 상태 없는 인증
//! - **OAuth 2.0**: Google 로그인과 기존 계정 자동 연결
//! - **역할 지정**: 역할이 없는 사용자에 한해 한 번만 지정
//! - **명시적 DI**: `AppState`에서 조립되는 생성자 주입
//! - **MongoDB**: 사용자/프로필 영구 저장 (개발용 메모리 저장소 선택 가능)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (UserService, GoogleAuthService, ...)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    UserStore    │ ← 데이터 액세스 (MongoDB / 메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use tourism_auth_backend::config::AppConfig;
//! use tourism_auth_backend::core::AppState;
//!
//! let config = AppConfig::from_env()?;
//! let state = AppState::new(config, store, provider)?;
//!
//! let response = state.users.register(request).await?;
//! let claims = state.tokens.validate(&response.token)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
