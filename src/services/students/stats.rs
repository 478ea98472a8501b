use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::StudentListParams, responses::StudentStatsResponse},
};
use crate::services::storage_error_response;

/// 按当前筛选条件统计，忽略分页参数
pub async fn student_stats(
    service: &StudentService,
    query: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_students_filtered(&query.filter, query.sort_by, query.sort_order, None)
        .await
    {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentStatsResponse::from_students(&students),
            "Student statistics retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to compute student statistics",
            e,
        )),
    }
}
