//! 사용자 저장소
//!
//! 서비스 계층은 [`UserStore`] 트레이트에만 의존합니다.
//!
//! - [`user_repo::MongoUserStore`] - MongoDB (운영)
//! - [`memory_repo::MemoryUserStore`] - 프로세스 메모리 (로컬 개발, 테스트)
//!
//! 이메일 중복은 두 구현 모두 `ConflictError("Email already registered")`로 보고합니다.

pub mod user_repo;
pub mod memory_repo;

pub use memory_repo::MemoryUserStore;
pub use user_repo::MongoUserStore;

use async_trait::async_trait;

use crate::domain::entities::profiles::{Driver, NewDriver, NewTourist, Tourist};
use crate::domain::entities::users::{NewUser, Role, User};
use crate::errors::AppResult;

pub(crate) const EMAIL_TAKEN: &str = "Email already registered";
pub(crate) const GOOGLE_ID_TAKEN: &str = "Google account is already linked to another user";

/// 조건부 역할 지정 결과
#[derive(Debug, Clone, PartialEq)]
pub enum RoleAssignment {
    /// 역할이 비어 있어 지정됨. 갱신된 사용자
    Assigned(User),
    /// 이미 역할이 있어 변경하지 않음
    AlreadyAssigned(Role),
    /// 해당 ID의 사용자가 없음
    UserMissing,
}

/// 사용자 저장소 인터페이스
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<User>>;

    /// 새 ID를 발급하여 사용자를 저장합니다. 이메일이나 Google ID가 중복이면 `ConflictError`.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// 기존 사용자 문서를 통째로 교체합니다. 사용자가 없으면 `NotFound`.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// 역할이 비어 있을 때만 지정합니다.
    ///
    /// 검사와 쓰기가 하나의 조건부 쓰기로 수행되므로 동시 요청 중 하나만 성공합니다.
    async fn assign_role_if_unset(&self, user_id: i64, role: Role) -> AppResult<RoleAssignment>;

    /// 회원가입 작업 단위를 엽니다.
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>>;
}

/// 사용자와 역할별 프로필을 함께 만드는 작업 단위
///
/// `commit` 전에 값이 버려지거나 `rollback`되면 아무것도 남지 않습니다.
#[async_trait]
pub trait UnitOfWork: Send {
    async fn create_user(&mut self, user: NewUser) -> AppResult<User>;

    async fn create_tourist(&mut self, user_id: i64, tourist: NewTourist) -> AppResult<Tourist>;

    async fn create_driver(&mut self, user_id: i64, driver: NewDriver) -> AppResult<Driver>;

    async fn commit(self: Box<Self>) -> AppResult<()>;

    async fn rollback(self: Box<Self>) -> AppResult<()>;
}
