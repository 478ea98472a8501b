use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::models::{ApiResponse, ErrorCode, fees::requests::UpdateFeeRequest};
use crate::services::storage_error_response;

pub async fn update_fee(
    service: &FeeService,
    fee_id: i64,
    update_data: UpdateFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(amount_due) = update_data.amount_due
        && (!amount_due.is_finite() || amount_due <= 0.0)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FeeInvalid,
            "应缴金额必须大于 0",
        )));
    }
    if let Some(discount) = update_data.discount
        && (!discount.is_finite() || discount < 0.0)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FeeInvalid,
            "减免金额不能为负数",
        )));
    }

    let storage = service.get_storage(request);

    // 减免不超过应缴、余额不为负由存储层在事务内校验
    match storage.update_fee(fee_id, update_data).await {
        Ok(Some(fee)) => Ok(HttpResponse::Ok().json(ApiResponse::success(fee, "收费项目更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeeNotFound,
            "收费项目不存在",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::FeeInvalid,
            "Failed to update fee record",
            e,
        )),
    }
}
