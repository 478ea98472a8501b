use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SalaryService;
use crate::models::{ApiResponse, ErrorCode, salaries::requests::PaySalariesRequest};
use crate::services::storage_error_response;

/// 单次批量发放的最大条数
const MAX_BATCH: usize = 500;

pub async fn pay_salaries(
    service: &SalaryService,
    pay_data: PaySalariesRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if pay_data.ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SalaryInvalid,
            "请至少选择一条工资记录",
        )));
    }
    if pay_data.ids.len() > MAX_BATCH {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SalaryInvalid,
            format!("单次最多发放 {MAX_BATCH} 条"),
        )));
    }

    let storage = service.get_storage(request);

    match storage
        .pay_salaries(&pay_data.ids, pay_data.method, pay_data.paid_on)
        .await
    {
        Ok(result) => {
            info!(
                "Salaries paid via {}: {} updated, {} skipped",
                pay_data.method,
                result.updated.len(),
                result.skipped.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "发放完成")))
        }
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to pay salaries",
            e,
        )),
    }
}
