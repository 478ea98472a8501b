use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::errors::SchoolAdminError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_fee(
    service: &FeeService,
    fee_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_fee(fee_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("收费项目已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeeNotFound,
            "收费项目不存在",
        ))),
        Err(SchoolAdminError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::FeeHasPayments, msg))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Fee deletion failed",
            e,
        )),
    }
}
