//! MongoDB 사용자 저장소
//!
//! ## 컬렉션
//!
//! | 컬렉션 | 내용 | 인덱스 |
//! |--------|------|--------|
//! | `users` | [`User`] | `email` unique, `google_id` unique (문자열인 문서만) |
//! | `tourists` | [`Tourist`] | `user_id` unique |
//! | `drivers` | [`Driver`] | `user_id` unique |
//! | `counters` | 컬렉션별 숫자 ID 시퀀스 | - |
//!
//! ID는 `counters` 컬렉션의 `$inc`로 발급합니다. 롤백된 회원가입의 ID는 재사용되지 않습니다.

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use mongodb::{
    bson::{doc, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    ClientSession, Collection, IndexModel,
};

use super::{RoleAssignment, UnitOfWork, UserStore, EMAIL_TAKEN, GOOGLE_ID_TAKEN};
use crate::db::Database;
use crate::domain::entities::profiles::{Driver, NewDriver, NewTourist, Tourist};
use crate::domain::entities::users::{NewUser, Role, User};
use crate::errors::{AppError, AppResult};

const USERS: &str = "users";
const TOURISTS: &str = "tourists";
const DRIVERS: &str = "drivers";
const COUNTERS: &str = "counters";

const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoUserStore {
    db: Database,
}

impl MongoUserStore {
    /// 저장소를 만들고 인덱스를 보장합니다.
    ///
    /// 인덱스 생성이 컬렉션도 만들어 두므로, 이후 트랜잭션 안에서 첫 쓰기가 일어나도 안전합니다.
    pub async fn new(db: Database) -> AppResult<Self> {
        let store = Self { db };
        store.create_indexes().await?;
        Ok(store)
    }

    fn users(&self) -> Collection<User> {
        self.db.get_database().collection(USERS)
    }

    fn tourists(&self) -> Collection<Tourist> {
        self.db.get_database().collection(TOURISTS)
    }

    fn drivers(&self) -> Collection<Driver> {
        self.db.get_database().collection(DRIVERS)
    }

    /// 컬렉션별 다음 숫자 ID
    ///
    /// 트랜잭션 밖에서 실행되므로 시퀀스 문서가 트랜잭션 충돌의 원인이 되지 않습니다.
    async fn next_id(&self, sequence: &str) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .db
            .get_database()
            .collection::<Document>(COUNTERS)
            .find_one_and_update(doc! { "_id": sequence }, doc! { "$inc": { "seq": 1_i64 } })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::DatabaseError(format!("{} 시퀀스 발급 실패", sequence)))?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(format!("{} 시퀀스 값 오류: {}", sequence, e)))
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        // 연결되지 않은 사용자는 google_id 필드가 없으므로 문자열인 문서만 유일성 검사
        let google_id_index = IndexModel::builder()
            .keys(doc! { "google_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .partial_filter_expression(doc! { "google_id": { "$type": "string" } })
                .name("google_id_unique".to_string())
                .build())
            .build();

        self.users()
            .create_indexes([email_index, google_id_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let profile_owner_index = || {
            IndexModel::builder()
                .keys(doc! { "user_id": 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build())
                .build()
        };

        self.tourists()
            .create_index(profile_owner_index())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        self.drivers()
            .create_index(profile_owner_index())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        debug!("사용자 저장소 인덱스 확인 완료");
        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.users()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<User>> {
        self.users()
            .find_one(doc! { "google_id": google_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let id = self.next_id(USERS).await?;
        let user = user.into_user(id, Utc::now());

        self.users()
            .insert_one(&user)
            .await
            .map_err(map_write_error)?;

        Ok(user)
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let result = self
            .users()
            .replace_one(doc! { "_id": user.id }, user)
            .await
            .map_err(map_write_error)?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    async fn assign_role_if_unset(&self, user_id: i64, role: Role) -> AppResult<RoleAssignment> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        // role: null 은 필드가 없거나 null인 문서 모두와 일치
        let updated = self
            .users()
            .find_one_and_update(
                doc! { "_id": user_id, "role": null },
                doc! { "$set": { "role": role.as_str() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(user) = updated {
            return Ok(RoleAssignment::Assigned(user));
        }

        match self.find_by_id(user_id).await? {
            None => Ok(RoleAssignment::UserMissing),
            Some(User { role: Some(current), .. }) => Ok(RoleAssignment::AlreadyAssigned(current)),
            Some(_) => Err(AppError::DatabaseError(format!(
                "사용자 {}의 역할 지정이 적용되지 않았습니다",
                user_id
            ))),
        }
    }

    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let mut session = self
            .db
            .client()
            .start_session()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        session
            .start_transaction()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(Box::new(MongoUnitOfWork {
            store: self.clone(),
            session,
        }))
    }
}

/// 클라이언트 세션 트랜잭션
///
/// 커밋 전에 세션이 버려지면 드라이버가 트랜잭션을 중단합니다.
pub struct MongoUnitOfWork {
    store: MongoUserStore,
    session: ClientSession,
}

#[async_trait]
impl UnitOfWork for MongoUnitOfWork {
    async fn create_user(&mut self, user: NewUser) -> AppResult<User> {
        let id = self.store.next_id(USERS).await?;
        let user = user.into_user(id, Utc::now());

        self.store
            .users()
            .insert_one(&user)
            .session(&mut self.session)
            .await
            .map_err(map_write_error)?;

        Ok(user)
    }

    async fn create_tourist(&mut self, user_id: i64, tourist: NewTourist) -> AppResult<Tourist> {
        let id = self.store.next_id(TOURISTS).await?;
        let tourist = tourist.into_tourist(id, user_id, Utc::now());

        self.store
            .tourists()
            .insert_one(&tourist)
            .session(&mut self.session)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(tourist)
    }

    async fn create_driver(&mut self, user_id: i64, driver: NewDriver) -> AppResult<Driver> {
        let id = self.store.next_id(DRIVERS).await?;
        let driver = driver.into_driver(id, user_id, Utc::now());

        self.store
            .drivers()
            .insert_one(&driver)
            .session(&mut self.session)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(driver)
    }

    async fn commit(mut self: Box<Self>) -> AppResult<()> {
        self.session
            .commit_transaction()
            .await
            .map_err(map_write_error)
    }

    async fn rollback(mut self: Box<Self>) -> AppResult<()> {
        if let Err(e) = self.session.abort_transaction().await {
            // 세션이 닫히면 서버가 트랜잭션을 정리하므로 실패는 기록만 한다
            warn!("트랜잭션 중단 실패: {}", e);
        }
        Ok(())
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// 고유 인덱스 위반은 어떤 인덱스인지에 따라 공개 메시지를 고릅니다.
fn map_write_error(err: MongoError) -> AppError {
    if !is_duplicate_key(&err) {
        return AppError::DatabaseError(err.to_string());
    }

    if err.to_string().contains("google_id") {
        AppError::ConflictError(GOOGLE_ID_TAKEN.to_string())
    } else {
        AppError::ConflictError(EMAIL_TAKEN.to_string())
    }
}
