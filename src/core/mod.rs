//! # Core Module
//!
//! 서비스 그래프 조립을 담당합니다.
//!
//! ### [`state`] - 애플리케이션 상태
//! - **AppState**: 설정과 서비스들을 담는 명시적 컨테이너
//! - **생성자 주입**: 각 서비스는 필요한 의존성을 `Arc`로 받음
//! - 전역 상태 없음. 테스트마다 독립된 그래프를 만들 수 있음
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::core::state::AppState;
//!
//! let state = web::Data::new(AppState::new(config, store, provider)?);
//!
//! App::new()
//!     .app_data(state.clone())
//!     .configure(|cfg| configure_all_routes(cfg, state.tokens.clone()))
//! ```

pub mod state;

pub use state::AppState;
