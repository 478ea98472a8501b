use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SalaryService;
use crate::models::{ApiResponse, ErrorCode, salaries::entities::SalaryStatus};
use crate::services::storage_error_response;

pub async fn delete_salary(
    service: &SalaryService,
    salary_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_salary_by_id(salary_id).await {
        Ok(Some(salary)) if salary.status == SalaryStatus::Paid => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SalaryAlreadyPaid,
                "已发放的工资记录不能删除",
            )));
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SalaryNotFound,
                "工资记录不存在",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::InternalServerError,
                "Failed to get salary record",
                e,
            ));
        }
    }

    match storage.delete_salary(salary_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("工资记录已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SalaryNotFound,
            "工资记录不存在",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Salary deletion failed",
            e,
        )),
    }
}
