//! Authentication HTTP Handlers
//!
//! 회원가입, 로그인, Google OAuth, 역할 지정, 내 정보 조회 엔드포인트입니다.
//! 모든 핸들러는 `web::Data<AppState>`에서 서비스를 꺼내 사용합니다.
//!
//! # Endpoints
//!
//! - **로컬 인증**: `POST /auth/register`, `POST /auth/login`
//! - **OAuth 2.0**: `GET /auth/google`, `GET /auth/google/callback`
//! - **보호됨**: `POST /auth/update-role`, `GET /auth/me` (인증 미들웨어 필요)
use actix_web::http::header::LOCATION;
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::users::request::{
    LoginRequest, OAuthCallbackQuery, RegisterRequest, UpdateRoleRequest,
};
use crate::domain::dto::users::response::{MeResponse, RoleUpdatedResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;

/// 회원가입 핸들러
///
/// 사용자와 역할별 프로필을 함께 만들고, 바로 사용할 수 있는 토큰을 반환합니다.
///
/// # Endpoint
/// `POST /auth/register`
///
/// # Responses
/// - `201` `{user, token}`
/// - `400` 형식 오류, 잘못된 역할, 날짜 형식 오류
/// - `409` 이미 등록된 이메일
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.users.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /auth/login`
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.users.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Google 인가 페이지로 리다이렉트
///
/// # Endpoint
/// `GET /auth/google`
#[get("/google")]
pub async fn google_login(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, state.google.authorization_url()))
        .finish()
}

/// Google OAuth 콜백 처리 핸들러
///
/// 성공하면 토큰과 사용자 이름, 이메일을 쿼리로 붙여 프론트엔드로 302 리다이렉트합니다.
/// 인가 코드 이후 단계의 실패는 원인과 무관하게 고정 문구의 500입니다.
///
/// # Endpoint
/// `GET /auth/google/callback?code={code}`
#[get("/google/callback")]
pub async fn google_callback(
    state: web::Data<AppState>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(code) = query.authorization_code() else {
        if let Some(error) = &query.error {
            log::warn!("Google OAuth 에러 콜백: {}", error);
        }
        return Err(AppError::ValidationError(
            "Authorization code not provided".to_string(),
        ));
    };

    let (user, token) = state
        .google
        .authenticate_with_code(code)
        .await
        .map_err(|e| match e {
            AppError::UpstreamError(_) => e,
            other => AppError::UpstreamError(other.to_string()),
        })?;

    let location = state
        .config
        .frontend
        .success_redirect(&token, &user.name, &user.email);

    Ok(HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish())
}

/// 역할 지정 핸들러
///
/// 역할이 없는 사용자만 한 번 지정할 수 있습니다.
///
/// # Endpoint
/// `POST /auth/update-role` (인증 필요)
pub async fn update_role(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|_| AppError::ValidationError("Invalid role. Must be 'tourist' or 'driver'".to_string()))?;

    let updated = state.users.update_role(user.user_id, &payload.role).await?;
    Ok(HttpResponse::Ok().json(RoleUpdatedResponse::new(&updated)))
}

/// 현재 사용자 정보 조회 핸들러
///
/// 토큰은 유효하지만 사용자가 삭제된 경우 401 `USER_NOT_FOUND`.
///
/// # Endpoint
/// `GET /auth/me` (인증 필요)
pub async fn me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let found = state.users.find_by_id(user.user_id).await?;
    Ok(HttpResponse::Ok().json(MeResponse::from(found)))
}
