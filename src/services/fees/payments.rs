use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::FeeService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    fees::{
        entities::PaymentOutcome,
        requests::RecordPaymentRequest,
        responses::{FeePaymentListResponse, RecordPaymentResponse},
    },
};
use crate::services::storage_error_response;

pub async fn record_payment(
    service: &FeeService,
    fee_id: i64,
    payment: RecordPaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !payment.amount.is_finite() || payment.amount <= 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PaymentInvalid,
            "缴费金额必须大于 0",
        )));
    }

    let recorded_by = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let storage = service.get_storage(request);

    match storage.record_payment(fee_id, payment, recorded_by).await {
        Ok(PaymentOutcome::Recorded { payment, fee }) => {
            info!(
                "Payment {} of {:.2} recorded on fee {} by user {}",
                payment.receipt_no, payment.amount, fee_id, recorded_by
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                RecordPaymentResponse { payment, fee },
                "缴费登记成功",
            )))
        }
        Ok(PaymentOutcome::FeeNotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::FeeNotFound, "收费项目不存在"),
        )),
        Ok(PaymentOutcome::ExceedsBalance { balance }) => {
            warn!("Payment on fee {} exceeds balance {:.2}", fee_id, balance);
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::PaymentExceedsBalance,
                format!("缴费金额不能超过未缴余额 {balance:.2}"),
            )))
        }
        Err(e) => Ok(storage_error_response(
            ErrorCode::PaymentInvalid,
            "Failed to record payment",
            e,
        )),
    }
}

pub async fn list_payments(
    service: &FeeService,
    fee_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_fee_by_id(fee_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FeeNotFound,
                "收费项目不存在",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::InternalServerError,
                "Failed to get fee record",
                e,
            ));
        }
    }

    match storage.list_fee_payments(fee_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            FeePaymentListResponse { items },
            "Payments retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to retrieve payments",
            e,
        )),
    }
}
