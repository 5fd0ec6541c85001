//! # 애플리케이션 상태 컨테이너
//!
//! `main`에서 한 번 조립되어 `web::Data<AppState>`로 모든 워커가 공유합니다.
//! 서비스는 생성자로 의존성을 받으므로 테스트에서는 메모리 저장소와
//! 가짜 ID 프로바이더로 같은 그래프를 조립할 수 있습니다.
//!
//! ```text
//! AppConfig ─┬─ TokenService ──────────────┬─ UserService
//!            │                             │
//! UserStore ─┼─ IdentityService ───────────┼─ GoogleAuthService
//!            │                             │
//! IdentityProvider ────────────────────────┘
//! ```

use std::sync::Arc;

use log::info;

use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::repositories::users::UserStore;
use crate::services::auth::{
    GoogleAuthService, IdentityProvider, IdentityService, PasswordHasher, TokenService,
};
use crate::services::users::UserService;

/// 요청 처리에 필요한 모든 서비스
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub users: Arc<UserService>,
    pub google: Arc<GoogleAuthService>,
}

impl AppState {
    /// 운영용 조립. bcrypt cost는 고정값을 사용합니다.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn UserStore>,
        provider: Arc<dyn IdentityProvider>,
    ) -> AppResult<Self> {
        Self::with_hasher(config, store, provider, PasswordHasher::new())
    }

    pub fn with_hasher(
        config: AppConfig,
        store: Arc<dyn UserStore>,
        provider: Arc<dyn IdentityProvider>,
        hasher: PasswordHasher,
    ) -> AppResult<Self> {
        let tokens = Arc::new(TokenService::new(&config.jwt)?);
        let identity = Arc::new(IdentityService::new(store.clone(), hasher));

        let users = Arc::new(UserService::new(store, hasher, tokens.clone()));
        let google = Arc::new(GoogleAuthService::new(
            provider,
            identity,
            tokens.clone(),
            config.google.clone(),
        ));

        info!(
            "서비스 초기화 완료 (토큰 유효기간 {}시간)",
            config.jwt.expiration_hours
        );

        Ok(Self {
            config: Arc::new(config),
            tokens,
            users,
            google,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 핸들러/라우트 테스트용 조립 헬퍼

    use super::*;
    use async_trait::async_trait;

    use crate::config::test_env;
    use crate::domain::models::oauth::GoogleUserInfo;
    use crate::repositories::users::MemoryUserStore;
    use crate::services::auth::FederationError;

    /// 고정된 코드 하나만 받아들이는 가짜 ID 프로바이더
    pub struct FakeIdentityProvider {
        pub accepted_code: &'static str,
        pub profile: GoogleUserInfo,
    }

    impl Default for FakeIdentityProvider {
        fn default() -> Self {
            Self {
                accepted_code: "good-code",
                profile: GoogleUserInfo {
                    id: "1089".to_string(),
                    email: "ana@example.com".to_string(),
                    verified_email: true,
                    name: "Ana Pérez".to_string(),
                    given_name: "Ana".to_string(),
                    family_name: "Pérez".to_string(),
                    picture: None,
                },
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeIdentityProvider {
        async fn exchange_code(&self, code: &str) -> Result<String, FederationError> {
            if code == self.accepted_code {
                Ok("ya29.token".to_string())
            } else {
                Err(FederationError::Status {
                    status: 400,
                    body: "invalid_grant".to_string(),
                })
            }
        }

        async fn fetch_profile(&self, _access_token: &str) -> Result<GoogleUserInfo, FederationError> {
            Ok(self.profile.clone())
        }
    }

    pub fn test_config() -> AppConfig {
        let vars = test_env::minimal();
        AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    /// 메모리 저장소와 가짜 프로바이더로 조립한 상태
    pub fn memory_state() -> (AppState, MemoryUserStore) {
        let store = MemoryUserStore::new();
        let state = AppState::with_hasher(
            test_config(),
            Arc::new(store.clone()),
            Arc::new(FakeIdentityProvider::default()),
            PasswordHasher::with_cost(4),
        )
        .unwrap();
        (state, store)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;

    #[test]
    fn test_services_share_one_token_service() {
        let (state, _) = memory_state();
        assert_eq!(state.config.jwt.expiration_hours, 24);
        assert_eq!(state.config.frontend.url, "http://localhost:5173");
    }
}
