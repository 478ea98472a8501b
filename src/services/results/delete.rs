use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_result(
    service: &ResultService,
    result_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_term_result(result_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("成绩已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResultNotFound,
            "成绩记录不存在",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Result deletion failed",
            e,
        )),
    }
}
