use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::{bearer_token, forget_user};
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

/// 登出
///
/// 不要求登录：总是清除 refresh token cookie；若附带了有效的 access token，
/// 同时清掉该账号的缓存记录。
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = bearer_token(request)
        .and_then(|token| JwtUtils::verify_access_token(token).ok())
        .and_then(|claims| claims.user_id().ok());

    if let Some(user_id) = user_id {
        forget_user(request, user_id).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::success_empty("已退出登录")))
}
