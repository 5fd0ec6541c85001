//! JWT 클레임 모델

use serde::{Deserialize, Serialize};

/// 발급되는 토큰의 클레임
///
/// 검증을 통과한 토큰은 항상 이 형태로 정규화됩니다. 과거 형식의 `sub` 클레임만
/// 가진 토큰도 `user_id`가 채워진 상태로 반환됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID (양의 정수)
    pub user_id: i64,
    pub email: String,
    pub name: String,
    /// 만료 시각 (Unix 초)
    pub exp: i64,
}
