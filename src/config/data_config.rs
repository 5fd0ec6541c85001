//! 데이터 및 서버 설정 관리 모듈
//!
//! 서버 바인딩, 저장소, 외부 HTTP 클라이언트, Rate Limiting, 패스워드 해싱 설정을 관리합니다.

use super::{ConfigError, EnvSource};

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost. 빌드 시점에 고정되는 값입니다.
    ///
    /// 일반적인 서버 하드웨어에서 검증 1회가 100ms 안팎이 되도록 맞춘 값입니다.
    pub const BCRYPT_COST: u32 = 10;
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩 호스트. 기본값: "0.0.0.0"
    pub host: String,
    /// 바인딩 포트. 기본값: 8080
    pub port: u16,
    /// actix 워커 스레드 수. 기본값: 4
    pub workers: usize,
}

impl ServerConfig {
    pub(crate) fn load(source: &EnvSource<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: source.or_default("HOST", "0.0.0.0"),
            port: source.parsed_or("PORT", 8080)?,
            workers: source.parsed_or("HTTP_WORKERS", 4)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 사용할 저장소 구현
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// MongoDB (운영 환경). 트랜잭션을 위해 replica set 구성이 필요합니다.
    MongoDb,
    /// 프로세스 메모리 (로컬 개발용, 재시작 시 데이터 소실)
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                name: "STORE_BACKEND",
                reason: format!("지원하지 않는 저장소: {}", other),
            }),
        }
    }
}

/// 저장소 연결 설정
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// MongoDB 연결 문자열
    pub mongodb_uri: String,
    /// 사용할 데이터베이스 이름
    pub database_name: String,
    /// 커넥션 풀 최대 크기
    pub max_pool_size: u32,
    /// 연결 및 서버 선택 타임아웃 (초)
    pub timeout_secs: u64,
}

impl StoreConfig {
    pub(crate) fn load(source: &EnvSource<'_>) -> Result<Self, ConfigError> {
        let backend = match source.get("STORE_BACKEND") {
            Some(raw) => StoreBackend::parse(&raw)?,
            None => StoreBackend::MongoDb,
        };

        Ok(Self {
            backend,
            mongodb_uri: source.or_default("MONGODB_URI", "mongodb://localhost:27017"),
            database_name: source.or_default("DATABASE_NAME", "tourism_auth"),
            max_pool_size: source.parsed_or("MONGODB_MAX_POOL_SIZE", 20)?,
            timeout_secs: source.parsed_or("MONGODB_TIMEOUT_SECS", 10)?,
        })
    }
}

/// 외부 HTTP 호출 (ID 프로바이더) 설정
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// 요청 전체 타임아웃 (초). 기본값: 10
    pub timeout_secs: u64,
}

impl HttpClientConfig {
    pub(crate) fn load(source: &EnvSource<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            timeout_secs: source.parsed_or("HTTP_CLIENT_TIMEOUT_SECS", 10)?,
        })
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub(crate) fn load(source: &EnvSource<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            per_second: source.parsed_or("RATE_LIMIT_PER_SECOND", 100)?,
            burst_size: source.parsed_or("RATE_LIMIT_BURST_SIZE", 200)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_from_string() {
        assert_eq!(StoreBackend::parse("mongodb").unwrap(), StoreBackend::MongoDb);
        assert_eq!(StoreBackend::parse("Memory").unwrap(), StoreBackend::Memory);
        assert!(StoreBackend::parse("postgres").is_err());
    }

    #[test]
    fn test_bind_address() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
            workers: 2,
        };
        assert_eq!(server.bind_address(), "127.0.0.1:3001");
    }
}
