//! Google OAuth 2.0 인증 서비스
//!
//! ## 인증 플로우
//!
//! ```text
//! 1. GET /auth/google           → Google 인가 페이지로 302
//! 2. Google → GET /auth/google/callback?code=...
//! 3. code → access_token        (POST token endpoint, form)
//! 4. access_token → 사용자 정보  (GET userinfo, Bearer)
//! 5. 사용자 정보 → 로컬 사용자    (IdentityService::reconcile)
//! 6. JWT 발급 → 프론트엔드로 302
//! ```
//!
//! 외부 호출 실패는 원인과 무관하게 [`FederationError`]가 되고, 클라이언트에게는
//! 고정 문구의 500만 전달됩니다. Google의 에러 본문은 로그에만 남습니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{GoogleOAuthConfig, HttpClientConfig};
use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::GoogleUserInfo;
use crate::errors::AppError;
use crate::services::auth::identity_service::IdentityService;
use crate::services::auth::token_service::TokenService;

/// 외부 ID 프로바이더 호출 실패
#[derive(Debug, Error)]
pub enum FederationError {
    #[error("프로바이더 요청 실패: {0}")]
    Network(String),

    #[error("프로바이더가 {status} 응답: {body}")]
    Status { status: u16, body: String },

    #[error("프로바이더 응답 해석 실패: {0}")]
    Decode(String),

    #[error("프로바이더 프로필에 id 또는 email이 없습니다")]
    IncompleteProfile,
}

impl From<FederationError> for AppError {
    fn from(err: FederationError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

/// 외부 ID 프로바이더
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 인가 코드를 액세스 토큰으로 교환
    async fn exchange_code(&self, code: &str) -> Result<String, FederationError>;

    /// 액세스 토큰으로 연합 프로필 조회
    async fn fetch_profile(&self, access_token: &str) -> Result<GoogleUserInfo, FederationError>;
}

#[derive(Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

/// Google OAuth 2.0 HTTP 클라이언트
///
/// `reqwest::Client`는 하나만 만들어 모든 요청이 커넥션 풀을 공유합니다.
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    config: GoogleOAuthConfig,
}

impl GoogleOAuthClient {
    pub fn new(config: GoogleOAuthConfig, http_config: &HttpClientConfig) -> Result<Self, AppError> {
        let timeout = Duration::from_secs(http_config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigurationError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { http, config })
    }

    /// 실패 응답 본문은 로그용으로만 읽는다
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, FederationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(FederationError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuthClient {
    async fn exchange_code(&self, code: &str) -> Result<String, FederationError> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| FederationError::Network(e.to_string()))?;

        let token = Self::ensure_success(response)
            .await?
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| FederationError::Decode(e.to_string()))?;

        if token.access_token.is_empty() {
            return Err(FederationError::Decode("빈 access_token".to_string()));
        }
        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<GoogleUserInfo, FederationError> {
        let response = self
            .http
            .get(&self.config.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| FederationError::Network(e.to_string()))?;

        let profile = Self::ensure_success(response)
            .await?
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| FederationError::Decode(e.to_string()))?;

        if !profile.has_identity() {
            return Err(FederationError::IncompleteProfile);
        }
        Ok(profile)
    }
}

/// Google 로그인 오케스트레이션
pub struct GoogleAuthService {
    provider: Arc<dyn IdentityProvider>,
    identity: Arc<IdentityService>,
    tokens: Arc<TokenService>,
    config: GoogleOAuthConfig,
}

impl GoogleAuthService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        identity: Arc<IdentityService>,
        tokens: Arc<TokenService>,
        config: GoogleOAuthConfig,
    ) -> Self {
        Self {
            provider,
            identity,
            tokens,
            config,
        }
    }

    /// Google 인가 페이지 URL
    pub fn authorization_url(&self) -> String {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", GoogleOAuthConfig::SCOPES),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.auth_uri, query_string)
    }

    /// 인가 코드로 로그인하여 로컬 사용자와 발급된 토큰을 반환
    pub async fn authenticate_with_code(&self, code: &str) -> Result<(User, String), AppError> {
        let access_token = self.provider.exchange_code(code).await?;
        let profile = self.provider.fetch_profile(&access_token).await?;

        if !profile.verified_email {
            log::warn!("Google 이메일 미인증 계정 로그인: {}", profile.email);
        }

        let user = self.identity.reconcile(&profile).await?;
        let token = self.tokens.issue(&user)?;

        log::info!("Google 로그인 성공 - 사용자 ID: {}", user.id);
        Ok((user, token))
    }
}
