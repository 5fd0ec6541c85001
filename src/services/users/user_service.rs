//! 사용자 서비스
//!
//! 이메일/패스워드 회원가입과 로그인, 단 한 번만 가능한 역할 지정, 내 정보 조회를 담당합니다.
//!
//! 회원가입은 사용자 생성과 역할별 프로필 생성을 하나의 작업 단위로 묶습니다.
//! 프로필 생성이 실패하면 사용자도 롤백되어 역할만 있고 프로필이 없는 계정은 남지 않습니다.

use std::sync::Arc;

use log::{debug, error, info, warn};
use validator::Validate;

use crate::domain::dto::users::request::{LoginRequest, RegisterRequest};
use crate::domain::dto::users::response::AuthResponse;
use crate::domain::entities::profiles::{NewDriver, NewTourist};
use crate::domain::entities::users::{NewUser, Role, User};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::{RoleAssignment, UnitOfWork, UserStore};
use crate::services::auth::password_service::{PasswordError, PasswordHasher};
use crate::services::auth::token_service::TokenService;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_ROLE: &str = "Invalid role. Must be 'tourist' or 'driver'";

/// 회원가입 시 함께 만들 프로필
enum ProfilePlan {
    None,
    Tourist(NewTourist),
    Driver(NewDriver),
}

pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// 회원가입 후 바로 로그인 상태가 되도록 토큰까지 발급
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let role = parse_requested_role(request.role.as_deref())?;

        // 날짜 형식 오류는 해싱과 저장 전에 거른다
        let plan = match role {
            Some(Role::Tourist) => {
                let details = request.tourist.ok_or_else(|| {
                    AppError::ValidationError(
                        "Tourist details are required for the tourist role".to_string(),
                    )
                })?;
                ProfilePlan::Tourist(details.into_new_tourist()?)
            }
            Some(Role::Driver) => match request.driver {
                Some(details) => ProfilePlan::Driver(details.into()),
                None => ProfilePlan::None,
            },
            _ => ProfilePlan::None,
        };

        let password_hash = self.hasher.hash_blocking(request.password).await?;
        let new_user = NewUser::local(request.email, request.name, password_hash, role);

        let mut uow = self.store.begin().await?;
        let user = match Self::create_with_profile(uow.as_mut(), new_user, plan).await {
            Ok(user) => user,
            Err(e) => {
                if let Err(rollback_err) = uow.rollback().await {
                    error!("회원가입 롤백 실패: {}", rollback_err);
                }
                return Err(e);
            }
        };
        uow.commit().await?;

        let token = self.tokens.issue(&user)?;
        info!(
            "회원가입 완료 - 사용자 ID: {}, 역할: {}",
            user.id,
            user.role.map(|r| r.as_str()).unwrap_or("-")
        );

        Ok(AuthResponse::new(&user, token))
    }

    async fn create_with_profile(
        uow: &mut dyn UnitOfWork,
        new_user: NewUser,
        plan: ProfilePlan,
    ) -> AppResult<User> {
        let user = uow.create_user(new_user).await?;

        match plan {
            ProfilePlan::Tourist(tourist) => {
                uow.create_tourist(user.id, tourist).await?;
            }
            ProfilePlan::Driver(driver) => {
                uow.create_driver(user.id, driver).await?;
            }
            ProfilePlan::None => {}
        }

        Ok(user)
    }

    /// 이메일 없음, 패스워드 불일치, 저장된 해시 손상 모두 같은 401
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let Some(user) = self.store.find_by_email(request.email.trim()).await? else {
            debug!("로그인 실패 - 등록되지 않은 이메일");
            return Err(invalid_credentials());
        };

        match self
            .hasher
            .verify_blocking(user.password.clone(), request.password)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                debug!("로그인 실패 - 사용자 ID: {}", user.id);
                return Err(invalid_credentials());
            }
            Err(PasswordError::MalformedHash(reason)) => {
                error!("사용자 {}의 저장된 패스워드 해시가 손상됨: {}", user.id, reason);
                return Err(invalid_credentials());
            }
            Err(e) => return Err(e.into()),
        }

        let token = self.tokens.issue(&user)?;
        info!("로그인 성공 - 사용자 ID: {}", user.id);

        Ok(AuthResponse::new(&user, token))
    }

    /// 역할이 없는 사용자에게만 역할을 지정
    pub async fn update_role(&self, user_id: i64, raw_role: &str) -> AppResult<User> {
        let role = match parse_requested_role(Some(raw_role))? {
            Some(role) => role,
            None => return Err(AppError::ValidationError(INVALID_ROLE.to_string())),
        };

        match self.store.assign_role_if_unset(user_id, role).await? {
            RoleAssignment::Assigned(user) => {
                info!("사용자 {} 역할 지정: {}", user_id, role);
                Ok(user)
            }
            RoleAssignment::AlreadyAssigned(current) => {
                warn!(
                    "사용자 {}는 이미 역할 {}를 가지고 있어 {} 지정 거부",
                    user_id, current, role
                );
                Err(AppError::RoleAlreadyAssigned(current))
            }
            RoleAssignment::UserMissing => Err(AppError::NotFound("User not found".to_string())),
        }
    }

    /// 토큰의 주체를 조회. 없으면 `UserNotFound` (401)
    pub async fn find_by_id(&self, user_id: i64) -> AppResult<User> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound(user_id))
    }
}

fn invalid_credentials() -> AppError {
    AppError::AuthenticationError(INVALID_CREDENTIALS.to_string())
}

/// 빈 값은 미지정, `tourist`/`driver`만 허용. `admin`은 스스로 고를 수 없다
fn parse_requested_role(raw: Option<&str>) -> AppResult<Option<Role>> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<Role>() {
        Ok(role) if role.is_self_assignable() => Ok(Some(role)),
        _ => Err(AppError::ValidationError(INVALID_ROLE.to_string())),
    }
}
