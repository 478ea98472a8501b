use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FeeService;
use crate::models::{ApiResponse, ErrorCode, fees::requests::CreateFeeRequest};
use crate::services::storage_error_response;
use crate::utils::validate::validate_session;

/// 金额规则：应缴 > 0，0 <= 减免 <= 应缴
pub(crate) fn validate_fee_amounts(amount_due: f64, discount: f64) -> Result<(), &'static str> {
    if !amount_due.is_finite() || amount_due <= 0.0 {
        return Err("应缴金额必须大于 0");
    }
    if !discount.is_finite() || discount < 0.0 {
        return Err("减免金额不能为负数");
    }
    if discount > amount_due {
        return Err("减免金额不能超过应缴金额");
    }
    Ok(())
}

pub async fn create_fee(
    service: &FeeService,
    fee_data: CreateFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_session(fee_data.session.trim()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::FeeInvalid, msg)));
    }
    if let Err(msg) = validate_fee_amounts(fee_data.amount_due, fee_data.discount) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::FeeInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.get_student_by_id(fee_data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::InternalServerError,
                "Failed to check student",
                e,
            ));
        }
    }

    match storage.create_fee(fee_data).await {
        Ok(fee) => {
            info!(
                "Fee {} ({}) created for student {}",
                fee.id, fee.fee_type, fee.admission_no
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(fee, "收费项目创建成功")))
        }
        Err(e) => Ok(storage_error_response(
            ErrorCode::FeeInvalid,
            "Fee creation failed",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fee_amounts() {
        assert!(validate_fee_amounts(1000.0, 0.0).is_ok());
        assert!(validate_fee_amounts(1000.0, 1000.0).is_ok());
        assert!(validate_fee_amounts(0.0, 0.0).is_err());
        assert!(validate_fee_amounts(1000.0, -5.0).is_err());
        assert!(validate_fee_amounts(1000.0, 1000.01).is_err());
        assert!(validate_fee_amounts(f64::INFINITY, 0.0).is_err());
    }
}
