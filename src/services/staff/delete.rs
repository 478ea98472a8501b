use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::errors::SchoolAdminError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_staff(
    service: &StaffService,
    staff_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_staff(staff_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("教职工已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StaffNotFound,
            "教职工不存在",
        ))),
        Err(SchoolAdminError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::StaffHasSalaryRecords, msg))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Staff deletion failed",
            e,
        )),
    }
}
