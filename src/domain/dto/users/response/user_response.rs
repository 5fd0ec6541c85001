use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::User;

/// 사용자 공개 정보
///
/// 역할이 없으면 `role`은 빈 문자열입니다. 프론트엔드는 이 값으로 역할 선택 화면을 띄웁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: role_label(user),
        }
    }
}

/// 회원가입 / 로그인 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: &User, token: String) -> Self {
        Self {
            user: UserResponse::from(user),
            token,
        }
    }
}

/// 역할 지정 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdatedResponse {
    pub message: String,
    pub user: UserResponse,
}

impl RoleUpdatedResponse {
    pub fn new(user: &User) -> Self {
        Self {
            message: "Role updated successfully".to_string(),
            user: UserResponse::from(user),
        }
    }
}

/// `GET /auth/me` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub google_id: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        let role = role_label(&user);
        let User {
            id,
            email,
            name,
            google_id,
            created_at,
            ..
        } = user;

        Self {
            id,
            name,
            email,
            google_id,
            role,
            created_at,
        }
    }
}

fn role_label(user: &User) -> String {
    user.role.map(|role| role.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::Role;

    fn user(role: Option<Role>) -> User {
        User {
            id: 5,
            email: "ana@example.com".to_string(),
            password: "$2b$04$hash".to_string(),
            name: "Ana".to_string(),
            google_id: None,
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_response_never_contains_password() {
        let json = serde_json::to_value(UserResponse::from(&user(Some(Role::Tourist)))).unwrap();

        assert_eq!(json["role"], "tourist");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_unset_role_is_empty_string() {
        let response = UserResponse::from(&user(None));
        assert_eq!(response.role, "");
    }

    #[test]
    fn test_me_response_serializes_null_google_id() {
        let json = serde_json::to_value(MeResponse::from(user(None))).unwrap();

        assert!(json["google_id"].is_null());
        assert_eq!(json["id"], 5);
        assert!(json.get("password").is_none());
    }
}
