use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, linked_staff};
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => {
            let staff = linked_staff(storage.as_ref(), &user).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user, staff },
                "获取账号成功",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "账号不存在"))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "查询账号失败",
            e,
        )),
    }
}
