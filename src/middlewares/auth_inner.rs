//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let tokens = self.tokens.clone();

        Box::pin(async move {
            match authenticate(&req, &tokens) {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청에서 Bearer 토큰을 추출하고 검증
fn authenticate(req: &ServiceRequest, tokens: &TokenService) -> Result<AuthenticatedUser, AppError> {
    let header = req.headers().get(AUTHORIZATION).ok_or_else(|| {
        AppError::AuthenticationError("Authorization header is required".to_string())
    })?;

    let token = bearer_token(header.to_str().ok())?;

    let claims = tokens.validate(token).map_err(|e| {
        // 세부 원인은 로그에만 남긴다
        log::warn!("토큰 검증 실패: {}", e);
        AppError::AuthenticationError("Invalid token".to_string())
    })?;

    Ok(AuthenticatedUser::from(&claims))
}

/// 공백 하나로 나뉜 정확히 두 부분, 첫 부분은 대소문자 구분 `Bearer`
fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let invalid = || AppError::AuthenticationError("Invalid authorization header format".to_string());

    let parts: Vec<&str> = header.ok_or_else(invalid)?.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        // 토큰이 비어 있으면 형식은 통과하고 검증 단계에서 거부된다
        assert_eq!(bearer_token(Some("Bearer ")).unwrap(), "");

        for header in ["bearer abc", "Basic abc", "Bearer", "Bearer a b", "Bearer  abc", "abc"] {
            assert!(bearer_token(Some(header)).is_err(), "{}", header);
        }
        assert!(bearer_token(None).is_err());
    }
}
