use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_student(student_id).await {
        Ok(true) => {
            warn!("Student {} deleted together with fee and result records", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("学生已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生不存在",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::StudentDeleteFailed,
            "Student deletion failed",
            e,
        )),
    }
}
