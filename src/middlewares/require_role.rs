//! 角色校验中间件
//!
//! 必须挂在 [`RequireJWT`] 之内（即先认证再校验角色）。每个账号只有一个角色，
//! 因此只提供“命中任一允许角色即可”的语义：
//!
//! ```rust,ignore
//! web::scope("/api/v1/fees")
//!     .wrap(RequireJWT)
//!     .service(
//!         web::scope("")
//!             .wrap(RequireRole::new_any(UserRole::finance_roles()))
//!             .route("", web::get().to(list_fees)),
//!     )
//! ```

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{info, warn};

use crate::middlewares::RequireJWT;
use crate::models::{ErrorCode, users::entities::UserRole};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    pub fn new_any(roles: &[UserRole]) -> Self {
        Self {
            allowed: Rc::from(roles),
        }
    }

    fn permits(allowed: &[UserRole], role: &UserRole) -> bool {
        allowed.contains(role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let Some(user) = RequireJWT::extract_user(req.request()) else {
                warn!("RequireRole on {} without an authenticated user", req.path());
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "请先登录",
                    )
                    .map_into_right_body(),
                ));
            };

            if RequireRole::permits(&allowed, &user.role) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            info!(
                "User {} ({}) denied on {} {}",
                user.id,
                user.role,
                req.method(),
                req.path()
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    "当前角色无权执行此操作",
                )
                .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_sets() {
        let finance = RequireRole::new_any(UserRole::finance_roles());
        assert!(RequireRole::permits(&finance.allowed, &UserRole::Bursar));
        assert!(RequireRole::permits(&finance.allowed, &UserRole::Admin));
        assert!(!RequireRole::permits(&finance.allowed, &UserRole::Teacher));

        let admin = RequireRole::new_any(UserRole::admin_roles());
        assert!(!RequireRole::permits(&admin.allowed, &UserRole::Bursar));
    }
}
