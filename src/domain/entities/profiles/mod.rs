//! 역할별 프로필 엔티티
//!
//! 회원가입 시 사용자와 같은 작업 단위([`UnitOfWork`](crate::repositories::users::UnitOfWork))에서
//! 생성됩니다. 프로필 생성이 실패하면 사용자도 남지 않습니다.

pub mod tourist;
pub mod driver;

pub use driver::{Driver, NewDriver};
pub use tourist::{NewTourist, Tourist};

use serde::{Deserialize, Serialize};

/// 프로필 심사 상태
///
/// 가입 시점에는 항상 심사 대기이며, 이후 상태 전이는 이 서비스의 범위 밖입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Pending,
}
