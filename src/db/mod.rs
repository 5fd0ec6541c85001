//! Database Connection Management Module
//!
//! MongoDB 데이터베이스 연결 관리를 담당하는 모듈입니다.
//! 커넥션 풀 크기와 연결 타임아웃은 [`StoreConfig`]에서 옵니다.
//!
//! 회원가입은 트랜잭션을 사용하므로 MongoDB는 replica set(단일 노드 포함)으로
//! 구성되어 있어야 합니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::Database;
//!
//! let database = Database::connect(&config.store).await?;
//! let store = MongoUserStore::new(database).await?;
//! ```

use std::time::Duration;

use log::info;
use mongodb::{options::ClientOptions, Client};

use crate::config::StoreConfig;
use crate::errors::AppError;

/// MongoDB 데이터베이스 연결 래퍼
///
/// `Client`는 내부적으로 커넥션 풀을 공유하므로 복제 비용이 작습니다.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 설정에 따라 클라이언트를 만들고 `ping`으로 연결을 확인합니다.
    pub async fn connect(config: &StoreConfig) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri)
            .await
            .map_err(|e| AppError::ConfigurationError(format!("MONGODB_URI 파싱 실패: {}", e)))?;

        // 애플리케이션 이름 설정 (서버 측 모니터링용)
        client_options.app_name = Some("tourism_auth".to_string());
        client_options.max_pool_size = Some(config.max_pool_size);
        client_options.connect_timeout = Some(Duration::from_secs(config.timeout_secs));
        client_options.server_selection_timeout = Some(Duration::from_secs(config.timeout_secs));

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        client
            .database(&config.database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?;

        info!(
            "✅ MongoDB 연결 성공: {} (pool: {})",
            config.database_name, config.max_pool_size
        );

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 트랜잭션 세션을 열 때 사용
    pub fn client(&self) -> &Client {
        &self.client
    }
}
