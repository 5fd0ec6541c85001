//! JWT 토큰 관리 서비스 구현
//!
//! HMAC 서명 JWT의 발급과 검증을 담당합니다. 갱신(refresh) 토큰은 없으며,
//! 만료된 토큰의 사용자는 다시 로그인해야 합니다.
//!
//! ## 검증 단계
//!
//! 1. 구조 검사: 점으로 구분된 세 부분 → 아니면 [`TokenError::Malformed`]
//! 2. 헤더 확인: `alg`가 `HS256`/`HS384`/`HS512`가 아니면 [`TokenError::UnsupportedAlgorithm`]
//! 3. 서명 전 만료 확인: `exp`가 지났으면 서명과 무관하게 [`TokenError::Expired`]
//! 4. 서명과 `exp` 검증 (leeway 0)
//! 5. 주체 추출: `user_id`, 없으면 과거 형식의 `sub`. 숫자 또는 숫자 문자열만 허용
//!
//! 실패 원인은 로그에만 구분되어 남고, 클라이언트는 항상 `401 {"error":"Invalid token"}`을 받습니다.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::JwtConfig;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::TokenClaims;
use crate::errors::AppError;

const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// 토큰 검증/발급 실패 원인
#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("토큰 형식이 올바르지 않습니다")]
    Malformed,

    #[error("허용되지 않은 서명 알고리즘: {0}")]
    UnsupportedAlgorithm(String),

    #[error("토큰이 만료되었습니다")]
    Expired,

    #[error("서명이 일치하지 않습니다")]
    InvalidSignature,

    #[error("클레임이 올바르지 않습니다: {0}")]
    InvalidClaims(String),

    #[error("토큰 서명 실패: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => AppError::InternalError(msg),
            _ => AppError::AuthenticationError("Invalid token".to_string()),
        }
    }
}

/// 서명 검증 전에 읽는 헤더 필드
#[derive(Deserialize)]
struct UnverifiedHeader {
    alg: String,
}

/// 서명 검증 전에 읽는 만료 필드
#[derive(Deserialize)]
struct UnverifiedExpiry {
    #[serde(default)]
    exp: Option<i64>,
}

/// 서명 검증 후의 원본 클레임. 주체는 두 가지 이름과 두 가지 타입을 허용합니다.
#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    // 없으면 필수 클레임 검증에서 걸러진다
    #[serde(default)]
    exp: Option<i64>,
}

/// JWT 토큰 관리 서비스
///
/// 서명 키는 생성 시점에 한 번 설정되며 이후 바뀌지 않습니다.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// 서명 키가 비어 있으면 `ConfigurationError`. 서버는 이 경우 시작하지 않습니다.
    pub fn new(config: &JwtConfig) -> Result<Self, AppError> {
        if config.secret.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "JWT 서명 키가 설정되지 않았습니다".to_string(),
            ));
        }
        let ttl = Duration::try_hours(config.expiration_hours)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                AppError::ConfigurationError(format!(
                    "JWT 만료 시간이 올바르지 않습니다: {}시간",
                    config.expiration_hours
                ))
            })?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// 사용자를 위한 HS256 토큰 발급
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("토큰 만료 시각 계산 실패".to_string()))?;
        let claims = TokenClaims {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// 토큰을 검증하고 정규화된 클레임을 반환
    pub fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(TokenError::Malformed);
        }

        let header: UnverifiedHeader = decode_segment(segments[0])?;
        if !matches!(header.alg.as_str(), "HS256" | "HS384" | "HS512") {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let expiry: UnverifiedExpiry = decode_segment(segments[1])?;
        if let Some(exp) = expiry.exp {
            if exp < Utc::now().timestamp() {
                return Err(TokenError::Expired);
            }
        }

        let raw = decode::<RawClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => {
                    TokenError::UnsupportedAlgorithm(header_alg_name(token))
                }
                ErrorKind::MissingRequiredClaim(claim) => {
                    TokenError::InvalidClaims(format!("{} 클레임이 없습니다", claim))
                }
                _ => TokenError::Malformed,
            })?;

        let user_id = raw
            .user_id
            .as_ref()
            .and_then(parse_subject)
            .or_else(|| raw.sub.as_ref().and_then(parse_subject))
            .ok_or_else(|| TokenError::InvalidClaims("사용자 ID가 없습니다".to_string()))?;
        let exp = raw
            .exp
            .ok_or_else(|| TokenError::InvalidClaims("exp 클레임이 없습니다".to_string()))?;

        Ok(TokenClaims {
            user_id,
            email: raw.email.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            exp,
        })
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

fn header_alg_name(token: &str) -> String {
    token
        .split('.')
        .next()
        .and_then(|segment| decode_segment::<UnverifiedHeader>(segment).ok())
        .map(|header| header.alg)
        .unwrap_or_default()
}

/// 양의 정수 또는 양의 정수 문자열만 사용자 ID로 인정
fn parse_subject(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }?;

    (id > 0).then_some(id)
}
