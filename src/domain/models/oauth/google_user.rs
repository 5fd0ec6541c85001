//! # Google OAuth 사용자 정보 모델
//!
//! Google OAuth 2.0 UserInfo 엔드포인트(`/oauth2/v2/userinfo`)가 반환하는
//! 연합 프로필입니다. 저장되지 않고 계정 연결에만 쓰입니다.

use serde::Deserialize;

/// Google OAuth 2.0 사용자 정보 응답 구조체
///
/// | 필드 | 필수 스코프 | 설명 |
/// |------|-------------|------|
/// | `id`, `email` | `email` | 기본 식별 정보 |
/// | `name`, `given_name`, `family_name` | `profile` | 프로필 정보 |
/// | `picture` | `profile` | 프로필 사진 |
/// | `verified_email` | `email` | 이메일 검증 상태 |
///
/// `id`와 `email`은 응답에 없으면 역직렬화가 실패합니다. 빈 문자열은
/// [`GoogleUserInfo::has_identity`]로 걸러냅니다.
///
/// ```rust,ignore
/// let user_info: GoogleUserInfo = response.json().await?;
/// if !user_info.has_identity() {
///     return Err(FederationError::IncompleteProfile);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 계정 고유 ID
    pub id: String,

    pub email: String,

    #[serde(default)]
    pub verified_email: bool,

    /// 전체 표시 이름
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub given_name: String,

    #[serde(default)]
    pub family_name: String,

    /// 프로필 사진 URL
    #[serde(default)]
    pub picture: Option<String>,
}

impl GoogleUserInfo {
    /// 계정 식별에 필요한 `id`와 `email`이 모두 채워져 있는지 여부
    pub fn has_identity(&self) -> bool {
        !self.id.trim().is_empty() && !self.email.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_userinfo_deserializes_with_defaults() {
        let info: GoogleUserInfo =
            serde_json::from_str(r#"{"id":"1089","email":"ana@example.com"}"#).unwrap();

        assert_eq!(info.id, "1089");
        assert!(!info.verified_email);
        assert_eq!(info.name, "");
        assert!(info.picture.is_none());
        assert!(info.has_identity());
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let result = serde_json::from_str::<GoogleUserInfo>(r#"{"id":"1089","name":"Ana"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_id_has_no_identity() {
        let info: GoogleUserInfo =
            serde_json::from_str(r#"{"id":"","email":"ana@example.com"}"#).unwrap();
        assert!(!info.has_identity());
    }
}
