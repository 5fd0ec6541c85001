//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 이메일/패스워드 사용자와 Google 연합 사용자를 하나의 모델로 표현합니다.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 한 번 지정되면 바꿀 수 없습니다. `admin`은 운영자가 직접 부여하며
/// 회원가입이나 역할 지정 API로는 얻을 수 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tourist,
    Driver,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tourist => "tourist",
            Role::Driver => "driver",
            Role::Admin => "admin",
        }
    }

    /// 사용자가 스스로 선택할 수 있는 역할인지 여부
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Role::Tourist | Role::Driver)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 역할 문자열
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tourist" => Ok(Role::Tourist),
            "driver" => Ok(Role::Driver),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// 사용자 엔티티
///
/// `id`는 저장소가 발급하는 양의 정수이며, 토큰의 `user_id` 클레임으로 그대로 쓰입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: i64,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// bcrypt 해시. Google로만 가입한 사용자는 임의 값의 해시를 가집니다.
    pub password: String,
    /// 표시 이름
    pub name: String,
    /// Google 계정 ID (unique, 연결된 경우에만 존재)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    /// 사용자 역할 (미지정 가능)
    #[serde(default)]
    pub role: Option<Role>,
    /// 생성 시간 (UTC)
    pub created_at: DateTime<Utc>,
}

/// 아직 ID가 발급되지 않은 사용자
///
/// 저장소의 `create`에 전달되며, 저장소가 ID와 생성 시간을 채워 [`User`]를 돌려줍니다.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub google_id: Option<String>,
    pub role: Option<Role>,
}

impl NewUser {
    /// 이메일/패스워드 회원가입 사용자
    pub fn local(email: String, name: String, password_hash: String, role: Option<Role>) -> Self {
        Self {
            email,
            password: password_hash,
            name,
            google_id: None,
            role,
        }
    }

    /// Google 로그인으로 처음 생성되는 사용자. 역할은 미지정 상태로 시작합니다.
    pub fn federated(email: String, name: String, google_id: String, placeholder_hash: String) -> Self {
        Self {
            email,
            password: placeholder_hash,
            name,
            google_id: Some(google_id),
            role: None,
        }
    }

    pub fn into_user(self, id: i64, created_at: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            password: self.password,
            name: self.name,
            google_id: self.google_id,
            role: self.role,
            created_at,
        }
    }
}
