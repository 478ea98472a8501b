use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use super::update::guard_last_admin;
use crate::middlewares::{RequireJWT, require_jwt::forget_user};
use crate::models::users::entities::{UserRole, UserStatus};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

/// 删除账号，不能删除自己，也不能删除最后一个启用的管理员
pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CannotDeleteSelf,
            "不能删除当前登录的账号",
        )));
    }

    let storage = service.get_storage(request);

    let target = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "账号不存在")));
        }
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::UserDeleteFailed,
                "查询账号失败",
                e,
            ));
        }
    };

    if target.role == UserRole::Admin
        && target.status == UserStatus::Active
        && let Some(response) = guard_last_admin(storage.as_ref()).await
    {
        return Ok(response);
    }

    match storage.delete_user(user_id).await {
        Ok(true) => {
            forget_user(request, user_id).await;
            info!("Account {} ({}) deleted", target.username, user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("账号已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "账号不存在"))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::UserDeleteFailed,
            "删除账号失败",
            e,
        )),
    }
}
