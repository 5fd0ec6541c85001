//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소 구현은 [`users::UserStore`] 트레이트 뒤에 숨겨지며, 어떤 구현을 쓸지는
//! 시작 시 설정(`STORE_BACKEND`)으로 결정됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{MongoUserStore, UserStore};
//!
//! let store: Arc<dyn UserStore> = Arc::new(MongoUserStore::new(database).await?);
//! let user = store.find_by_email("user@example.com").await?;
//! ```

pub mod users;
