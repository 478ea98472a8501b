use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::middlewares::RequireJWT;
use crate::models::auth::responses::{
    RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse,
};
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::users::linked_staff;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn session_expired() -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "登录已过期，请重新登录",
        ))
}

fn not_logged_in() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(ErrorCode::Unauthorized, "请先登录"))
}

/// 用 cookie 中的 refresh token 换取新的 access token
///
/// 新令牌按账号当前的角色签发；账号已删除或停用时清除 cookie 并返回 401。
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(not_logged_in());
    };

    let user_id = match JwtUtils::verify_refresh_token(&refresh_token).and_then(|c| c.user_id()) {
        Ok(user_id) => user_id,
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            return Ok(session_expired());
        }
    };

    let user = match service.get_storage(request).get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Active => user,
        Ok(_) => {
            info!("Refresh denied for missing or disabled user {}", user_id);
            return Ok(session_expired());
        }
        Err(e) => {
            error!("Failed to load user {} during refresh: {}", user_id, e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "刷新令牌失败",
            )));
        }
    };

    match JwtUtils::generate_access_token(user.id, &user.role.to_string()) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                token_type: "Bearer".to_string(),
                expires_in: service.get_config().jwt.access_token_expiry * 60,
            },
            "令牌已刷新",
        ))),
        Err(e) => {
            error!("Failed to sign access token: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "刷新令牌失败",
            )))
        }
    }
}

pub async fn handle_verify_token(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TokenVerificationResponse {
                is_valid: true,
                user_id: user.id,
                role: user.role.to_string(),
            },
            "令牌有效",
        ))),
        None => Ok(not_logged_in()),
    }
}

pub async fn handle_get_user(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(not_logged_in());
    };

    let storage = service.get_storage(request);
    let staff = linked_staff(storage.as_ref(), &user).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse { user, staff },
        "获取当前账号成功",
    )))
}
