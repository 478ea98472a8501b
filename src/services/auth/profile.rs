use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::middlewares::require_jwt::forget_user;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::services::users::{hash_new_password, linked_staff};
use crate::utils::password::verify_password;
use crate::utils::validate::validate_email;

use super::AuthService;

/// 修改自己的邮箱、密码或显示名，角色与状态只能由管理员修改
pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "请先登录")));
    };
    let storage = service.get_storage(request);

    if let Some(ref email) = update_data.email {
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
        }
        if let Ok(Some(owner)) = storage.get_user_by_email(email).await
            && owner.id != current_user.id
        {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "该邮箱已被其他账号使用",
            )));
        }
    }

    // 请求扩展中的账号可能来自缓存，不含密码哈希
    if update_data.password.is_some() {
        let stored_hash = match storage.get_user_by_id(current_user.id).await {
            Ok(Some(user)) => user.password_hash,
            Ok(None) => String::new(),
            Err(e) => {
                return Ok(storage_error_response(
                    ErrorCode::UserUpdateFailed,
                    "查询账号失败",
                    e,
                ));
            }
        };
        let confirmed = update_data
            .current_password
            .as_deref()
            .is_some_and(|current| verify_password(current, &stored_hash));
        if !confirmed {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserPasswordInvalid,
                "原密码不正确",
            )));
        }
    }

    let password = match update_data.password.as_deref().map(hash_new_password) {
        Some(Ok(hash)) => Some(hash),
        Some(Err(response)) => return Ok(response),
        None => None,
    };

    let update = UpdateUserRequest {
        email: update_data.email,
        password,
        display_name: update_data.display_name,
        ..Default::default()
    };

    match storage.update_user(current_user.id, update).await {
        Ok(Some(user)) => {
            forget_user(request, user.id).await;
            let staff = linked_staff(storage.as_ref(), &user).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user, staff },
                "个人资料已更新",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "账号不存在"))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::UserUpdateFailed,
            "更新个人资料",
            e,
        )),
    }
}
