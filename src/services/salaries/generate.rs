use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SalaryService;
use crate::models::{ApiResponse, ErrorCode, salaries::requests::GeneratePayrollRequest};
use crate::services::storage_error_response;
use crate::utils::validate::validate_period;

pub async fn generate_payroll(
    service: &SalaryService,
    generate_data: GeneratePayrollRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let period = generate_data.period.trim();
    if let Err(msg) = validate_period(period) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SalaryInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.generate_payroll(period).await {
        Ok(result) => {
            info!(
                "Payroll {} generated: {} created, {} skipped",
                result.period, result.created, result.skipped
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "工资单生成完成")))
        }
        Err(e) => Ok(storage_error_response(
            ErrorCode::SalaryInvalid,
            "Payroll generation failed",
            e,
        )),
    }
}
