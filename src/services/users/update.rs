use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, hash_new_password, linked_staff};
use crate::middlewares::require_jwt::forget_user;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{User, UserRole, UserStatus},
        requests::UpdateUserRequest,
        responses::UserResponse,
    },
};
use crate::services::storage_error_response;
use crate::storage::Storage;
use crate::utils::validate::validate_email;

fn is_active_admin(user: &User) -> bool {
    user.role == UserRole::Admin && user.status == UserStatus::Active
}

/// 本次修改是否会让一个启用中的管理员失去管理权限
fn demotes_active_admin(current: &User, update: &UpdateUserRequest) -> bool {
    if !is_active_admin(current) {
        return false;
    }
    let role_lost = update.role.as_ref().is_some_and(|role| *role != UserRole::Admin);
    let disabled = update
        .status
        .as_ref()
        .is_some_and(|status| *status != UserStatus::Active);
    role_lost || disabled
}

/// 系统中至少保留一个启用的管理员
pub(super) async fn guard_last_admin(storage: &dyn Storage) -> Option<HttpResponse> {
    match storage.count_active_admins().await {
        Ok(count) if count > 1 => None,
        Ok(_) => Some(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::LastAdminRequired,
            "至少需要保留一个启用的管理员账号",
        ))),
        Err(e) => Some(storage_error_response(
            ErrorCode::InternalServerError,
            "统计管理员失败",
            e,
        )),
    }
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref email) = update_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let current = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "账号不存在")));
        }
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::UserUpdateFailed,
                "查询账号失败",
                e,
            ));
        }
    };

    if demotes_active_admin(&current, &update_data)
        && let Some(response) = guard_last_admin(storage.as_ref()).await
    {
        return Ok(response);
    }

    if let Some(password) = update_data.password.take() {
        update_data.password = match hash_new_password(&password) {
            Ok(hash) => Some(hash),
            Err(response) => return Ok(response),
        };
    }

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            forget_user(request, user.id).await;
            let staff = linked_staff(storage.as_ref(), &user).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user, staff },
                "账号已更新",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "账号不存在"))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserEmailAlreadyExists, "该邮箱已被其他账号使用"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::UserUpdateFailed,
            "更新账号失败",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: UserRole, status: UserStatus) -> User {
        let now = chrono::Utc::now();
        User {
            id: 1,
            username: "head".into(),
            email: "head@school.local".into(),
            password_hash: String::new(),
            role,
            status,
            display_name: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_demotion_detection() {
        let admin = account(UserRole::Admin, UserStatus::Active);

        let to_bursar = UpdateUserRequest {
            role: Some(UserRole::Bursar),
            ..Default::default()
        };
        assert!(demotes_active_admin(&admin, &to_bursar));

        let suspend = UpdateUserRequest {
            status: Some(UserStatus::Suspended),
            ..Default::default()
        };
        assert!(demotes_active_admin(&admin, &suspend));

        let rename = UpdateUserRequest {
            display_name: Some("Head Teacher".into()),
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        assert!(!demotes_active_admin(&admin, &rename));

        let teacher = account(UserRole::Teacher, UserStatus::Active);
        assert!(!demotes_active_admin(&teacher, &suspend));
    }
}
