use serde::Deserialize;
use validator::Validate;

/// 이메일/패스워드 로그인 요청
///
/// 형식 검증을 하지 않습니다. 잘못된 입력도 저장소 조회에서 걸러져
/// 다른 실패와 같은 `Invalid credentials`로 응답합니다.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 역할 지정 요청
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, message = "Invalid role. Must be 'tourist' or 'driver'"))]
    pub role: String,
}

/// Google OAuth 콜백 쿼리
///
/// `code`가 없으면 핸들러에서 400을 반환하므로 선택 필드로 받습니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    /// 사용자가 동의를 거부한 경우 Google이 전달하는 에러 코드
    pub error: Option<String>,
}

impl OAuthCallbackQuery {
    /// 공백이 아닌 인가 코드
    pub fn authorization_code(&self) -> Option<&str> {
        self.code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_code_is_treated_as_missing() {
        let query = OAuthCallbackQuery {
            code: Some("  ".to_string()),
            error: None,
        };
        assert!(query.authorization_code().is_none());

        let query = OAuthCallbackQuery {
            code: Some("4/0Ab".to_string()),
            error: None,
        };
        assert_eq!(query.authorization_code(), Some("4/0Ab"));
    }
}
