//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   UserStore - 데이터 접근                        ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 얇게 유지합니다. 요청을 역직렬화하고 `web::Data<AppState>`의
//! 서비스를 호출한 뒤 결과를 상태 코드와 함께 돌려줄 뿐입니다.
//! 에러는 `?`로 전파되어 [`AppError`](crate::errors::AppError)의
//! `ResponseError` 구현이 `{"error": ..}` 응답으로 바꿉니다.
//!
//! ```rust,ignore
//! #[post("/login")]
//! pub async fn login(
//!     state: web::Data<AppState>,
//!     payload: web::Json<LoginRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let response = state.users.login(payload.into_inner()).await?;
//!     Ok(HttpResponse::Ok().json(response))
//! }
//! ```

pub mod auth;
