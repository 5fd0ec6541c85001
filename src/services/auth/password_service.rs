//! 패스워드 해싱 서비스
//!
//! bcrypt 해싱과 검증, Google 전용 계정에 넣을 임의 패스워드 생성을 담당합니다.
//! 해싱은 CPU를 오래 쓰므로 요청 처리 경로에서는 `*_blocking` 변형을 사용해
//! actix의 블로킹 스레드 풀에서 실행합니다.

use actix_web::web;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::rngs::OsRng;
use rand::TryRngCore;
use thiserror::Error;

use crate::config::PasswordConfig;
use crate::errors::AppError;

/// 임의 패스워드 바이트 수
const PLACEHOLDER_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("패스워드 해싱 실패: {0}")]
    Hashing(String),

    #[error("저장된 해시 형식이 올바르지 않습니다: {0}")]
    MalformedHash(String),

    #[error("난수 생성 실패: {0}")]
    Rng(String),

    #[error("블로킹 작업 실패: {0}")]
    Worker(String),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// bcrypt 해셔
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            cost: PasswordConfig::BCRYPT_COST,
        }
    }

    /// 테스트에서 bcrypt 최소 cost(4)로 만들 때 사용
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| PasswordError::Hashing(e.to_string()))
    }

    /// 불일치는 `Ok(false)`. 해시 자체가 깨진 경우에만 에러입니다.
    pub fn verify(&self, hashed: &str, plaintext: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(plaintext, hashed).map_err(|e| PasswordError::MalformedHash(e.to_string()))
    }

    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, PasswordError> {
        let hasher = *self;
        web::block(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| PasswordError::Worker(e.to_string()))?
    }

    pub async fn verify_blocking(
        &self,
        hashed: String,
        plaintext: String,
    ) -> Result<bool, PasswordError> {
        let hasher = *self;
        web::block(move || hasher.verify(&hashed, &plaintext))
            .await
            .map_err(|e| PasswordError::Worker(e.to_string()))?
    }
}

/// Google 전용 계정의 임의 패스워드
///
/// OS 난수 32바이트를 URL-safe base64(패딩 포함)로 인코딩합니다. 이 값은 어디에도
/// 저장되지 않고 해시만 남으므로 패스워드 로그인으로는 접근할 수 없습니다.
pub fn generate_placeholder_password() -> Result<String, PasswordError> {
    let mut bytes = [0u8; PLACEHOLDER_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| PasswordError::Rng(e.to_string()))?;
    Ok(URL_SAFE.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_cost(4)
    }

    #[test]
    fn test_hash_then_verify() {
        let hashed = hasher().hash("pw123456").unwrap();

        assert_ne!(hashed, "pw123456");
        assert!(hasher().verify(&hashed, "pw123456").unwrap());
        assert!(!hasher().verify(&hashed, "pw1234567").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(matches!(
            hasher().verify("not-a-bcrypt-hash", "pw123456"),
            Err(PasswordError::MalformedHash(_))
        ));
    }

    #[test]
    fn test_default_cost_is_fixed() {
        let hashed = PasswordHasher::new().hash("pw123456").unwrap();
        assert!(hashed.starts_with("$2b$10$"));
    }

    #[test]
    fn test_placeholder_password_shape() {
        let first = generate_placeholder_password().unwrap();
        let second = generate_placeholder_password().unwrap();

        // 32바이트 → 패딩 포함 44자
        assert_eq!(first.len(), 44);
        assert!(first.ends_with('='));
        assert!(!first.contains('+') && !first.contains('/'));
        assert_ne!(first, second);
    }

    #[actix_web::test]
    async fn test_blocking_variants() {
        let hashed = hasher().hash_blocking("pw123456".to_string()).await.unwrap();
        assert!(hasher()
            .verify_blocking(hashed, "pw123456".to_string())
            .await
            .unwrap());
    }
}
