//! # Authentication Configuration Module
//!
//! JWT 토큰, Google OAuth 2.0, 로그인 후 프론트엔드 리다이렉트 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### Google OAuth 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/auth/google/callback"
//! ```
//!
//! `GOOGLE_REDIRECT_URI`는 Google Console에 등록된 값과 문자 단위로 정확히 같아야 합니다.
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```

use super::{ConfigError, EnvSource};

/// 토큰 기본 수명 (시간). 갱신 없이 만료 후 재로그인이 필요합니다.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// 토큰 수명 상한 (1년). 만료 시각 계산이 넘치지 않는 범위로 제한합니다.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// 과거 버전에서 환경 변수가 없을 때 쓰이던 기본 서명 키들.
/// 누구나 알고 있는 값이므로 설정되어 있으면 기동을 거부합니다.
const KNOWN_INSECURE_SECRETS: &[&str] = &["your-secret-key", "secret", "changeme"];

/// JWT 서명 설정
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC 서명 키
    pub secret: String,
    /// 토큰 수명 (시간)
    pub expiration_hours: i64,
}

impl JwtConfig {
    pub(crate) fn load(source: &EnvSource<'_>) -> Result<Self, ConfigError> {
        let secret = source.required("JWT_SECRET")?;
        if KNOWN_INSECURE_SECRETS.contains(&secret.as_str()) {
            return Err(ConfigError::InsecureSecret("JWT_SECRET"));
        }

        let expiration_hours = source.parsed_or("JWT_EXPIRATION_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&expiration_hours) {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRATION_HOURS",
                reason: format!("1 이상 {} 이하여야 합니다", MAX_TOKEN_TTL_HOURS),
            });
        }

        Ok(Self {
            secret,
            expiration_hours,
        })
    }
}

// 서명 키가 로그에 찍히지 않도록 Debug를 직접 구현
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Google OAuth 2.0 클라이언트 설정
#[derive(Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
}

impl GoogleOAuthConfig {
    /// 요청하는 사용자 정보 범위
    pub const SCOPES: &'static str = "email profile";

    pub(crate) fn load(source: &EnvSource<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: source.required("GOOGLE_CLIENT_ID")?,
            client_secret: source.required("GOOGLE_CLIENT_SECRET")?,
            redirect_uri: source.required("GOOGLE_REDIRECT_URI")?,
            auth_uri: source.or_default(
                "GOOGLE_AUTH_URI",
                "https://accounts.google.com/o/oauth2/v2/auth",
            ),
            token_uri: source.or_default("GOOGLE_TOKEN_URI", "https://oauth2.googleapis.com/token"),
            userinfo_uri: source.or_default(
                "GOOGLE_USERINFO_URI",
                "https://www.googleapis.com/oauth2/v2/userinfo",
            ),
        })
    }
}

impl std::fmt::Debug for GoogleOAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleOAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_uri", &self.auth_uri)
            .field("token_uri", &self.token_uri)
            .field("userinfo_uri", &self.userinfo_uri)
            .finish()
    }
}

/// OAuth 로그인 완료 후 돌아갈 프론트엔드 설정
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// 프론트엔드 기본 URL. 콜백 성공 시 `{url}/success?...`로 리다이렉트합니다.
    pub url: String,
}

impl FrontendConfig {
    pub(crate) fn load(source: &EnvSource<'_>) -> Result<Self, ConfigError> {
        let raw = source.or_default("FRONTEND_URL", "http://localhost:5173");
        let url = raw.trim_end_matches('/');
        check_origin(url).map_err(|reason| ConfigError::Invalid {
            name: "FRONTEND_URL",
            reason: reason.to_string(),
        })?;

        Ok(Self {
            url: url.to_string(),
        })
    }

    /// OAuth 로그인 성공 후 토큰과 사용자 정보를 전달할 리다이렉트 URL
    pub fn success_redirect(&self, token: &str, name: &str, email: &str) -> String {
        format!(
            "{}/success?token={}&name={}&email={}",
            self.url,
            urlencoding::encode(token),
            urlencoding::encode(name),
            urlencoding::encode(email),
        )
    }
}

/// CORS 허용 Origin으로 쓸 수 있는 `scheme://host[:port]` 형태인지 확인
fn check_origin(url: &str) -> Result<(), &'static str> {
    if !url.chars().all(|c| c.is_ascii_graphic()) {
        return Err("공백 없이 출력 가능한 ASCII 문자만 사용할 수 있습니다");
    }

    let authority = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or("http:// 또는 https://로 시작해야 합니다")?;
    if authority.contains(['/', '?', '#', '@']) {
        return Err("경로, 쿼리, 프래그먼트, 사용자 정보 없이 Origin만 지정해야 합니다");
    }

    let (host, port) = match authority.strip_prefix('[') {
        Some(bracketed) => {
            let (host, rest) = bracketed
                .split_once(']')
                .ok_or("IPv6 호스트의 닫는 괄호가 없습니다")?;
            match rest {
                "" => (host, None),
                _ => (host, Some(rest.strip_prefix(':').ok_or("포트 구분자가 올바르지 않습니다")?)),
            }
        }
        None => match authority.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        },
    };
    if host.is_empty() {
        return Err("호스트가 비어 있습니다");
    }
    if let Some(port) = port {
        if port.parse::<u16>().is_err() {
            return Err("포트 번호가 올바르지 않습니다");
        }
    }

    Ok(())
}
