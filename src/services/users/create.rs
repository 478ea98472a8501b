use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UserService, hash_new_password, linked_staff};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_email, validate_username};

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_email(&user_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    user_data.password = match hash_new_password(&user_data.password) {
        Ok(hash) => hash,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("Account {} created with role {}", user.username, user.role);
            let staff = linked_staff(storage.as_ref(), &user).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user, staff },
                "账号创建成功",
            )))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserAlreadyExists, "用户名或邮箱已被使用"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::UserCreationFailed,
            "创建账号失败",
            e,
        )),
    }
}
