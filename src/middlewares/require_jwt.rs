//! JWT 认证中间件
//!
//! 校验 `Authorization: Bearer <access token>`，并把当前账号（[`User`]）放入请求扩展，
//! 处理函数通过 [`RequireJWT::extract_user`] 等方法读取。
//!
//! 令牌只携带用户 ID，角色与状态每次都以账号记录为准：记录会在对象缓存中保留
//! `cache.default_ttl` 秒，账号被修改、停用或删除时调用 [`forget_user`] 立即失效。

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserStatus};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode, header::AUTHORIZATION},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::fmt;
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

/// 账号缓存键
pub fn user_cache_key(user_id: i64) -> String {
    format!("auth:user:{user_id}")
}

/// 使缓存中的账号记录失效
pub async fn forget_user(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        cache.remove(&user_cache_key(user_id)).await;
    }
}

/// 从请求头中取出 bearer token
pub fn bearer_token(request: &HttpRequest) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[derive(Debug)]
enum Rejection {
    MissingToken,
    InvalidToken,
    AccountUnavailable,
    Misconfigured(&'static str),
    Storage,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingToken => write!(f, "缺少访问令牌"),
            Rejection::InvalidToken => write!(f, "访问令牌无效或已过期"),
            Rejection::AccountUnavailable => write!(f, "账号不存在或已停用"),
            Rejection::Misconfigured(what) => write!(f, "{what} 未配置"),
            Rejection::Storage => write!(f, "读取账号信息失败"),
        }
    }
}

impl Rejection {
    fn status(&self) -> StatusCode {
        match self {
            Rejection::Misconfigured(_) | Rejection::Storage => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn code(&self) -> ErrorCode {
        match self.status() {
            StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
            _ => ErrorCode::InternalServerError,
        }
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<User, Rejection> {
    let token = bearer_token(req.request()).ok_or(Rejection::MissingToken)?;

    let user_id = JwtUtils::verify_access_token(token)
        .and_then(|claims| claims.user_id())
        .map_err(|err| {
            debug!("Access token rejected: {}", err);
            Rejection::InvalidToken
        })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .ok_or(Rejection::Misconfigured("cache"))?
        .get_ref()
        .clone();
    let cache_key = user_cache_key(user_id);

    if let CacheResult::Found(json) = cache.get_raw(&cache_key).await {
        match serde_json::from_str::<User>(&json) {
            Ok(user) => return Ok(user),
            Err(_) => cache.remove(&cache_key).await,
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or(Rejection::Misconfigured("storage"))?
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {}: {}", user_id, e);
            Rejection::Storage
        })?
        .filter(|user| user.status == UserStatus::Active)
        .ok_or(Rejection::AccountUnavailable)?;

    if let Ok(json) = serde_json::to_string(&user) {
        cache
            .insert_raw(cache_key, json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检不带令牌
            if req.method() == Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(rejection) => {
                    info!(
                        "Rejected {} {}: {}",
                        req.method(),
                        req.path(),
                        rejection
                    );
                    let response = create_error_response(
                        rejection.status(),
                        rejection.code(),
                        &rejection.to_string(),
                    );
                    Ok(req.into_response(response.map_into_right_body()))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前登录账号，仅在挂载了本中间件的路由中有值
    pub fn extract_user(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_rejection_status() {
        assert_eq!(Rejection::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Rejection::Misconfigured("cache").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(Rejection::Storage.code(), ErrorCode::InternalServerError);
    }
}
