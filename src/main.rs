//! 관광 라이드 예약 인증 서비스 메인 애플리케이션
//!
//! 설정을 읽고 저장소와 서비스 그래프를 조립한 뒤 Actix-web HTTP 서버를 구동합니다.
//! 설정이 잘못되었거나 저장소에 연결할 수 없으면 서버를 띄우지 않고 종료합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use tourism_auth_backend::config::{AppConfig, StoreBackend, StoreConfig};
use tourism_auth_backend::core::AppState;
use tourism_auth_backend::db::Database;
use tourism_auth_backend::errors::AppError;
use tourism_auth_backend::repositories::users::{MemoryUserStore, MongoUserStore, UserStore};
use tourism_auth_backend::routes::configure_all_routes;
use tourism_auth_backend::services::auth::GoogleOAuthClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 관광 인증 서비스 시작중...");

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        error!("설정 로드 실패: {}", e);
        std::process::exit(1);
    });

    let state = build_state(config).await.unwrap_or_else(|e| {
        error!("서비스 초기화 실패: {}", e);
        std::process::exit(1);
    });

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(web::Data::new(state)).await
}

/// 저장소, ID 프로바이더, 서비스를 순서대로 조립합니다
async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let store = initialize_store(&config.store).await?;
    let provider = Arc::new(GoogleOAuthClient::new(
        config.google.clone(),
        &config.http_client,
    )?);

    AppState::new(config, store, provider)
}

/// 설정된 저장소 구현을 초기화합니다
///
/// MongoDB는 연결 확인(ping)과 인덱스 생성까지 마친 뒤 반환합니다.
async fn initialize_store(config: &StoreConfig) -> Result<Arc<dyn UserStore>, AppError> {
    match config.backend {
        StoreBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::connect(config).await?;
            let store = MongoUserStore::new(database).await?;
            info!("✅ MongoDB 연결 성공");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("메모리 저장소 사용 중 - 재시작하면 모든 사용자가 사라집니다");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let server = state.config.server.clone();
    let rate_limit = state.config.rate_limit.clone();
    let bind_address = server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Rate Limiting 설정이 올바르지 않습니다 (0 값은 허용되지 않음)",
            )
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second, rate_limit.burst_size
    );

    HttpServer::new(move || {
        let tokens = state.tokens.clone();
        let cors = configure_cors(&state.config.frontend.url);

        App::new()
            .app_data(state.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(move |cfg| configure_all_routes(cfg, tokens))
    })
    .bind(bind_address)?
    .workers(server.workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 로거 초기화 전에 실행되므로 결과는 표준 에러로 출력합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("[{}] {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("[{}] 환경 파일 로드 실패: {} (프로세스 환경 변수만 사용)", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=tourism_auth_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드 Origin(`FRONTEND_URL`)만 허용합니다.
fn configure_cors(frontend_url: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_url)
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
