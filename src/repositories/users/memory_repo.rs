//! 프로세스 메모리 사용자 저장소
//!
//! `STORE_BACKEND=memory`로 MongoDB 없이 서버를 띄울 때와 테스트에서 사용합니다.
//! 재시작하면 데이터가 사라집니다.
//!
//! 작업 단위의 쓰기는 커밋 시점까지 스테이징되어 있다가 한 번의 잠금 안에서 반영됩니다.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{RoleAssignment, UnitOfWork, UserStore, EMAIL_TAKEN, GOOGLE_ID_TAKEN};
use crate::domain::entities::profiles::{Driver, NewDriver, NewTourist, Tourist};
use crate::domain::entities::users::{NewUser, Role, User};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    tourists: Vec<Tourist>,
    drivers: Vec<Driver>,
    last_user_id: i64,
    last_tourist_id: i64,
    last_driver_id: i64,
}

impl MemoryState {
    fn next_user_id(&mut self) -> i64 {
        self.last_user_id += 1;
        self.last_user_id
    }

    fn next_tourist_id(&mut self) -> i64 {
        self.last_tourist_id += 1;
        self.last_tourist_id
    }

    fn next_driver_id(&mut self) -> i64 {
        self.last_driver_id += 1;
        self.last_driver_id
    }

    /// `except` ID를 제외한 사용자 중 고유 필드가 겹치는지 검사
    fn check_unique(&self, email: &str, google_id: Option<&str>, except: Option<i64>) -> AppResult<()> {
        for existing in self.users.values() {
            if Some(existing.id) == except {
                continue;
            }
            if existing.email == email {
                return Err(AppError::ConflictError(EMAIL_TAKEN.to_string()));
            }
            if google_id.is_some() && existing.google_id.as_deref() == google_id {
                return Err(AppError::ConflictError(GOOGLE_ID_TAKEN.to_string()));
            }
        }
        Ok(())
    }
}

/// 메모리 저장소. 복제본은 같은 데이터를 공유합니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, MemoryState>> {
        lock_state(&self.state)
    }

    pub fn user_count(&self) -> usize {
        self.lock().map(|state| state.users.len()).unwrap_or(0)
    }

    pub fn tourists_of(&self, user_id: i64) -> Vec<Tourist> {
        self.lock()
            .map(|state| {
                state
                    .tourists
                    .iter()
                    .filter(|t| t.user_id == user_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn drivers_of(&self, user_id: i64) -> Vec<Driver> {
        self.lock()
            .map(|state| {
                state
                    .drivers
                    .iter()
                    .filter(|d| d.user_id == user_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn lock_state(state: &Mutex<MemoryState>) -> AppResult<MutexGuard<'_, MemoryState>> {
    state
        .lock()
        .map_err(|_| AppError::InternalError("메모리 저장소 잠금이 손상되었습니다".to_string()))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut state = self.lock()?;
        state.check_unique(&user.email, user.google_id.as_deref(), None)?;

        let id = state.next_user_id();
        let user = user.into_user(id, Utc::now());
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let mut state = self.lock()?;
        if !state.users.contains_key(&user.id) {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        state.check_unique(&user.email, user.google_id.as_deref(), Some(user.id))?;

        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn assign_role_if_unset(&self, user_id: i64, role: Role) -> AppResult<RoleAssignment> {
        let mut state = self.lock()?;
        let Some(user) = state.users.get_mut(&user_id) else {
            return Ok(RoleAssignment::UserMissing);
        };

        if let Some(current) = user.role {
            return Ok(RoleAssignment::AlreadyAssigned(current));
        }

        user.role = Some(role);
        Ok(RoleAssignment::Assigned(user.clone()))
    }

    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        Ok(Box::new(MemoryUnitOfWork {
            state: Arc::clone(&self.state),
            users: Vec::new(),
            tourists: Vec::new(),
            drivers: Vec::new(),
        }))
    }
}

/// 스테이징된 쓰기. 커밋되지 않고 버려지면 저장소는 변하지 않습니다.
pub struct MemoryUnitOfWork {
    state: Arc<Mutex<MemoryState>>,
    users: Vec<User>,
    tourists: Vec<Tourist>,
    drivers: Vec<Driver>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn create_user(&mut self, user: NewUser) -> AppResult<User> {
        let mut state = lock_state(&self.state)?;
        state.check_unique(&user.email, user.google_id.as_deref(), None)?;
        if self.users.iter().any(|staged| staged.email == user.email) {
            return Err(AppError::ConflictError(EMAIL_TAKEN.to_string()));
        }

        let user = user.into_user(state.next_user_id(), Utc::now());
        self.users.push(user.clone());
        Ok(user)
    }

    async fn create_tourist(&mut self, user_id: i64, tourist: NewTourist) -> AppResult<Tourist> {
        let id = lock_state(&self.state)?.next_tourist_id();
        let tourist = tourist.into_tourist(id, user_id, Utc::now());
        self.tourists.push(tourist.clone());
        Ok(tourist)
    }

    async fn create_driver(&mut self, user_id: i64, driver: NewDriver) -> AppResult<Driver> {
        let id = lock_state(&self.state)?.next_driver_id();
        let driver = driver.into_driver(id, user_id, Utc::now());
        self.drivers.push(driver.clone());
        Ok(driver)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryUnitOfWork {
            state,
            users,
            tourists,
            drivers,
        } = *self;
        let mut state = lock_state(&state)?;

        // 스테이징 이후 다른 요청이 같은 이메일로 커밋했을 수 있다
        for user in &users {
            state.check_unique(&user.email, user.google_id.as_deref(), None)?;
        }

        for user in users {
            state.users.insert(user.id, user);
        }
        state.tourists.extend(tourists);
        state.drivers.extend(drivers);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_user(email: &str) -> NewUser {
        NewUser::local(
            email.to_string(),
            "Ana".to_string(),
            "$2b$04$hash".to_string(),
            None,
        )
    }

    fn new_tourist() -> NewTourist {
        NewTourist {
            nationality: "AR".to_string(),
            language: "es".to_string(),
            arrival_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            departure_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            preferences: String::new(),
            special_needs: String::new(),
        }
    }

    #[actix_web::test]
    async fn test_ids_are_positive_and_increasing() {
        let store = MemoryUserStore::new();
        let first = store.create(new_user("a@example.com")).await.unwrap();
        let second = store.create(new_user("b@example.com")).await.unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
    }

    #[actix_web::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();

        let err = store.create(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(ref msg) if msg == EMAIL_TAKEN));
    }

    #[actix_web::test]
    async fn test_save_rejects_google_id_taken_by_another_user() {
        let store = MemoryUserStore::new();
        let linked = NewUser::federated(
            "a@example.com".to_string(),
            "A".to_string(),
            "g-1".to_string(),
            "$2b$04$hash".to_string(),
        );
        store.create(linked).await.unwrap();
        let mut other = store.create(new_user("b@example.com")).await.unwrap();

        other.google_id = Some("g-1".to_string());
        assert!(matches!(
            store.save(&other).await,
            Err(AppError::ConflictError(_))
        ));
    }

    #[actix_web::test]
    async fn test_assign_role_only_once() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("a@example.com")).await.unwrap();

        let first = store.assign_role_if_unset(user.id, Role::Driver).await.unwrap();
        assert!(matches!(first, RoleAssignment::Assigned(ref u) if u.role == Some(Role::Driver)));

        let second = store.assign_role_if_unset(user.id, Role::Tourist).await.unwrap();
        assert_eq!(second, RoleAssignment::AlreadyAssigned(Role::Driver));

        let missing = store.assign_role_if_unset(999, Role::Tourist).await.unwrap();
        assert_eq!(missing, RoleAssignment::UserMissing);
    }

    #[actix_web::test]
    async fn test_unit_of_work_is_invisible_until_commit() {
        let store = MemoryUserStore::new();
        let mut uow = store.begin().await.unwrap();
        let user = uow.create_user(new_user("a@example.com")).await.unwrap();
        uow.create_tourist(user.id, new_tourist()).await.unwrap();

        assert!(store.find_by_id(user.id).await.unwrap().is_none());

        uow.commit().await.unwrap();

        assert!(store.find_by_id(user.id).await.unwrap().is_some());
        assert_eq!(store.tourists_of(user.id).len(), 1);
    }

    #[actix_web::test]
    async fn test_dropped_unit_of_work_leaves_nothing() {
        let store = MemoryUserStore::new();
        {
            let mut uow = store.begin().await.unwrap();
            uow.create_user(new_user("a@example.com")).await.unwrap();
        }
        let mut uow = store.begin().await.unwrap();
        uow.create_user(new_user("b@example.com")).await.unwrap();
        uow.rollback().await.unwrap();

        assert_eq!(store.user_count(), 0);
        assert!(store.find_by_email("a@example.com").await.unwrap().is_none());
    }
}
