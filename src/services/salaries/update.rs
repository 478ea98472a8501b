use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SalaryService;
use crate::errors::SchoolAdminError;
use crate::models::{ApiResponse, ErrorCode, salaries::requests::UpdateSalaryRequest};
use crate::services::storage_error_response;

pub async fn update_salary(
    service: &SalaryService,
    salary_id: i64,
    update_data: UpdateSalaryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_salary(salary_id, update_data).await {
        Ok(Some(salary)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(salary, "工资记录更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SalaryNotFound,
            "工资记录不存在",
        ))),
        Err(SchoolAdminError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::SalaryAlreadyPaid, msg))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::SalaryInvalid,
            "Failed to update salary record",
            e,
        )),
    }
}
