//! 연합 프로필 → 로컬 사용자 연결
//!
//! Google 프로필 하나는 항상 정확히 한 명의 로컬 사용자로 이어집니다.
//!
//! ## 우선순위
//!
//! 1. Google ID로 찾으면 그대로 반환
//! 2. 이메일로 찾으면 Google ID를 연결하여 저장 후 반환. 연결은 영구적입니다
//! 3. 둘 다 없으면 임의 패스워드 해시를 가진 새 사용자 생성 (역할 미지정)
//!
//! 세 단계는 하나의 트랜잭션이 아닙니다. 동시에 같은 프로필로 처음 로그인하면
//! 한쪽은 저장소의 고유 인덱스에 걸려 `ConflictError`로 끝나고, 재시도하면 1단계에서 찾습니다.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::entities::users::{NewUser, User};
use crate::domain::models::oauth::GoogleUserInfo;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use crate::services::auth::password_service::{generate_placeholder_password, PasswordHasher};

pub struct IdentityService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl IdentityService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub async fn reconcile(&self, profile: &GoogleUserInfo) -> AppResult<User> {
        if let Some(user) = self.store.find_by_google_id(&profile.id).await? {
            return Ok(user);
        }

        if let Some(mut user) = self.store.find_by_email(&profile.email).await? {
            if let Some(existing) = user.google_id.as_deref() {
                // 이메일이 같아도 이미 다른 Google 계정에 연결된 사용자는 덮어쓰지 않는다
                warn!(
                    "사용자 {}는 다른 Google 계정({})에 연결되어 있습니다",
                    user.id, existing
                );
                return Err(AppError::ConflictError(
                    "Account is already linked to a different Google account".to_string(),
                ));
            }

            user.google_id = Some(profile.id.clone());
            self.store.save(&user).await?;
            info!("기존 사용자 {}에 Google 계정 연결", user.id);
            return Ok(user);
        }

        let placeholder = generate_placeholder_password()?;
        let placeholder_hash = self.hasher.hash_blocking(placeholder).await?;

        let user = self
            .store
            .create(NewUser::federated(
                profile.email.clone(),
                display_name(profile),
                profile.id.clone(),
                placeholder_hash,
            ))
            .await?;

        info!("Google 로그인으로 새 사용자 {} 생성", user.id);
        Ok(user)
    }
}

/// `name`이 비어 있으면 given/family name, 그것도 없으면 이메일 앞부분
fn display_name(profile: &GoogleUserInfo) -> String {
    if !profile.name.trim().is_empty() {
        return profile.name.trim().to_string();
    }

    let joined = format!("{} {}", profile.given_name.trim(), profile.family_name.trim());
    if !joined.trim().is_empty() {
        return joined.trim().to_string();
    }

    profile
        .email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::MemoryUserStore;

    fn profile(id: &str, email: &str) -> GoogleUserInfo {
        GoogleUserInfo {
            id: id.to_string(),
            email: email.to_string(),
            verified_email: true,
            name: "Ana Pérez".to_string(),
            given_name: "Ana".to_string(),
            family_name: "Pérez".to_string(),
            picture: None,
        }
    }

    fn service(store: Arc<MemoryUserStore>) -> IdentityService {
        IdentityService::new(store, PasswordHasher::with_cost(4))
    }

    #[actix_web::test]
    async fn test_reconcile_is_idempotent() {
        let store = Arc::new(MemoryUserStore::new());
        let service = service(store.clone());

        let first = service.reconcile(&profile("g-1", "ana@example.com")).await.unwrap();
        let second = service.reconcile(&profile("g-1", "ana@example.com")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.user_count(), 1);
        assert!(first.role.is_none());
    }

    #[actix_web::test]
    async fn test_new_federated_user_gets_unusable_password_hash() {
        let store = Arc::new(MemoryUserStore::new());
        let user = service(store).reconcile(&profile("g-1", "ana@example.com")).await.unwrap();

        assert!(user.password.starts_with("$2b$"));
        assert_eq!(user.name, "Ana Pérez");
    }

    #[actix_web::test]
    async fn test_existing_local_user_is_linked_by_email() {
        let store = Arc::new(MemoryUserStore::new());
        let local = store
            .create(NewUser::local(
                "ana@example.com".to_string(),
                "Ana".to_string(),
                "$2b$04$hash".to_string(),
                None,
            ))
            .await
            .unwrap();
        let service = service(store.clone());

        let linked = service.reconcile(&profile("g-1", "ana@example.com")).await.unwrap();
        assert_eq!(linked.id, local.id);
        assert_eq!(linked.google_id.as_deref(), Some("g-1"));
        // 기존 패스워드는 그대로
        assert_eq!(linked.password, "$2b$04$hash");

        // 이후에는 이메일이 달라도 Google ID로 같은 사용자
        let again = service.reconcile(&profile("g-1", "other@example.com")).await.unwrap();
        assert_eq!(again.id, local.id);
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn test_email_owned_by_other_google_account_is_conflict() {
        let store = Arc::new(MemoryUserStore::new());
        let service = service(store.clone());
        service.reconcile(&profile("g-1", "ana@example.com")).await.unwrap();

        let err = service
            .reconcile(&profile("g-2", "ana@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ConflictError(_)));
        let stored = store.find_by_email("ana@example.com").await.unwrap().unwrap();
        assert_eq!(stored.google_id.as_deref(), Some("g-1"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut p = profile("g-1", "ana@example.com");
        p.name = String::new();
        assert_eq!(display_name(&p), "Ana Pérez");

        p.given_name = String::new();
        p.family_name = String::new();
        assert_eq!(display_name(&p), "ana");
    }
}
