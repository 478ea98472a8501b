use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FeeService;
use super::create::validate_fee_amounts;
use crate::models::{ApiResponse, ErrorCode, fees::requests::BulkCreateFeesRequest};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_required, validate_session};

pub async fn bulk_create_fees(
    service: &FeeService,
    bulk_data: BulkCreateFeesRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required(&bulk_data.class_name, 100) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FeeInvalid,
            format!("class_name {msg}"),
        )));
    }
    if let Err(msg) = validate_session(bulk_data.session.trim()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::FeeInvalid, msg)));
    }
    if let Err(msg) = validate_fee_amounts(bulk_data.amount_due, bulk_data.discount) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::FeeInvalid, msg)));
    }

    let storage = service.get_storage(request);
    let class_name = bulk_data.class_name.clone();

    match storage.bulk_create_fees(bulk_data).await {
        Ok(result) => {
            info!(
                "Bulk fees for class {}: {} created, {} skipped",
                class_name, result.created, result.skipped
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "批量创建完成")))
        }
        Err(e) => Ok(storage_error_response(
            ErrorCode::FeeInvalid,
            "Bulk fee creation failed",
            e,
        )),
    }
}
