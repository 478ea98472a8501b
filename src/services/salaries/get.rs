use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SalaryService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn get_salary(
    service: &SalaryService,
    salary_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_salary_by_id(salary_id).await {
        Ok(Some(salary)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            salary,
            "Salary record retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SalaryNotFound,
            "工资记录不存在",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to get salary record",
            e,
        )),
    }
}
