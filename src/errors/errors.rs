//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 내부 에러 메시지는 로그에만 남고, 클라이언트에게는 항상
//! `{"error": <공개 메시지>, "code"?: <고정 코드>}` 형태만 전달됩니다.
//! 토큰 검증 실패의 세부 원인, 외부 프로바이더의 에러 본문,
//! 데이터베이스 에러 문자열은 응답에 포함되지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find(store: &dyn UserStore, id: i64) -> Result<User, AppError> {
//!     store.find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("User not found".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::domain::entities::users::user::Role;

/// 애플리케이션 전역 에러 타입
///
/// `ValidationError`, `AuthenticationError`, `NotFound`, `ConflictError`의
/// 메시지는 그대로 클라이언트에게 노출되는 공개 메시지입니다.
/// 나머지 변형의 메시지는 로깅 전용입니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 저장소 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 역할이 이미 지정된 사용자에 대한 재지정 시도 (400 Bad Request)
    #[error("Role already assigned: {0}")]
    RoleAlreadyAssigned(Role),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 유효한 토큰이지만 주체가 더 이상 존재하지 않음 (401 Unauthorized)
    #[error("User {0} referenced by token no longer exists")]
    UserNotFound(i64),

    /// 외부 ID 프로바이더 에러 (500 Internal Server Error)
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// 설정 에러 (500, 기동 시점이면 프로세스 종료)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에게 노출할 메시지
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg) => msg.clone(),
            AppError::RoleAlreadyAssigned(_) => "User already has a role assigned".to_string(),
            AppError::UserNotFound(_) => "User not found".to_string(),
            AppError::UpstreamError(_) => "Google authentication failed".to_string(),
            AppError::DatabaseError(_)
            | AppError::ConfigurationError(_)
            | AppError::InternalError(_) => "Internal server error".to_string(),
        }
    }

    /// 클라이언트가 분기할 수 있는 고정 에러 코드
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AppError::UserNotFound(_) => Some("USER_NOT_FOUND"),
            AppError::RoleAlreadyAssigned(_) => Some("ROLE_ALREADY_ASSIGNED"),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::RoleAlreadyAssigned(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) | AppError::UserNotFound(_) => {
                StatusCode::UNAUTHORIZED
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 내부 메시지를 error 레벨로 기록하고, 응답에는 고정 문구만 담습니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        } else {
            log::debug!("요청 거부 ({}): {}", status.as_u16(), self);
        }

        let body = match self.code() {
            Some(code) => json!({ "error": self.public_message(), "code": code }),
            None => json!({ "error": self.public_message() }),
        };

        HttpResponse::build(status).json(body)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
