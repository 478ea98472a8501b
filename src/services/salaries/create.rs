use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SalaryService;
use crate::models::{
    ApiResponse, ErrorCode,
    salaries::{entities::PayBreakdown, requests::CreateSalaryRequest},
};
use crate::services::storage_error_response;
use crate::utils::validate::validate_period;

pub async fn create_salary(
    service: &SalaryService,
    mut salary_data: CreateSalaryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    salary_data.period = salary_data.period.trim().to_string();
    if let Err(msg) = validate_period(&salary_data.period) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SalaryInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let staff = match storage.get_staff_by_id(salary_data.staff_id).await {
        Ok(Some(staff)) => staff,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StaffNotFound,
                "教职工不存在",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::InternalServerError,
                "Failed to get staff",
                e,
            ));
        }
    };

    // 未指定基本工资时取员工档案中的基本工资
    let basic_salary = *salary_data.basic_salary.get_or_insert(staff.base_salary);
    if let Err(msg) = PayBreakdown::compute(
        basic_salary,
        salary_data.allowances,
        salary_data.deductions,
        salary_data.tax,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SalaryInvalid, msg)));
    }

    match storage
        .salary_exists(salary_data.staff_id, &salary_data.period)
        .await
    {
        Ok(true) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SalaryAlreadyExists,
                format!("{} 在 {} 已有工资记录", staff.full_name(), salary_data.period),
            )));
        }
        Ok(false) => {}
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::InternalServerError,
                "Failed to check salary records",
                e,
            ));
        }
    }

    match storage.create_salary(salary_data).await {
        Ok(salary) => {
            info!("Salary {} created for {} ({})", salary.id, salary.staff_no, salary.period);
            Ok(HttpResponse::Created().json(ApiResponse::success(salary, "工资记录创建成功")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SalaryAlreadyExists, "该月份已有工资记录"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::SalaryInvalid,
            "Salary creation failed",
            e,
        )),
    }
}
