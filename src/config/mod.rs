//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정값은 프로세스 시작 시 한 번만 읽혀 불변 [`AppConfig`]로 만들어지고,
//! 각 컴포넌트의 생성자에 참조로 전달됩니다. 실행 중에 환경 변수를 다시 읽는
//! 코드는 없습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 저장소, HTTP 클라이언트, Rate Limiting 설정
//! - [`auth_config`] - JWT, Google OAuth, 프론트엔드 리다이렉트 설정
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-long-random-secret"
//! export GOOGLE_CLIENT_ID="your-client-id.apps.googleusercontent.com"
//! export GOOGLE_CLIENT_SECRET="your-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/auth/google/callback"
//! ```
//!
//! `JWT_SECRET`이 없거나 과거에 쓰이던 기본값(`your-secret-key`)이면
//! 서버는 시작되지 않습니다.
//!
//! ## 선택적 환경 변수
//!
//! ```bash
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export HTTP_WORKERS="4"
//! export STORE_BACKEND="mongodb"          # mongodb | memory
//! export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
//! export DATABASE_NAME="tourism_auth"
//! export MONGODB_MAX_POOL_SIZE="20"
//! export JWT_EXPIRATION_HOURS="24"
//! export FRONTEND_URL="http://localhost:5173"
//! export HTTP_CLIENT_TIMEOUT_SECS="10"
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// 설정 로딩 에러
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("필수 환경 변수 {0}가 설정되지 않았습니다")]
    Missing(&'static str),

    #[error("환경 변수 {name} 값이 올바르지 않습니다: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("환경 변수 {0}에 알려진 기본값이 들어 있습니다. 안전한 임의 값을 설정하세요")]
    InsecureSecret(&'static str),
}

/// 애플리케이션 전체 설정
///
/// `main`에서 한 번 생성되어 `Arc`로 공유됩니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub http_client: HttpClientConfig,
    pub rate_limit: RateLimitConfig,
    pub jwt: JwtConfig,
    pub google: GoogleOAuthConfig,
    pub frontend: FrontendConfig,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정을 구성합니다.
    ///
    /// 테스트에서는 `HashMap` 기반 조회 함수를 넘겨 환경 변수를 건드리지 않습니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = EnvSource { lookup: &lookup };

        Ok(Self {
            server: ServerConfig::load(&source)?,
            store: StoreConfig::load(&source)?,
            http_client: HttpClientConfig::load(&source)?,
            rate_limit: RateLimitConfig::load(&source)?,
            jwt: JwtConfig::load(&source)?,
            google: GoogleOAuthConfig::load(&source)?,
            frontend: FrontendConfig::load(&source)?,
        })
    }
}

/// 설정 값 조회 헬퍼
pub(crate) struct EnvSource<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl EnvSource<'_> {
    /// 값이 있고 공백이 아닌 경우에만 반환
    pub(crate) fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub(crate) fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing(name))
    }

    pub(crate) fn or_default(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    /// 숫자 등 파싱이 필요한 값. 값이 잘못되면 기본값으로 넘어가지 않고 에러를 반환합니다.
    pub(crate) fn parsed_or<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_env {
    use std::collections::HashMap;

    /// 필수 값만 채운 테스트용 환경
    pub fn minimal() -> HashMap<&'static str, String> {
        HashMap::from([
            ("JWT_SECRET", "test-signing-secret-0123456789".to_string()),
            ("GOOGLE_CLIENT_ID", "client-id.apps.googleusercontent.com".to_string()),
            ("GOOGLE_CLIENT_SECRET", "client-secret".to_string()),
            (
                "GOOGLE_REDIRECT_URI",
                "http://localhost:8080/auth/google/callback".to_string(),
            ),
        ])
    }
}
