use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::models::{
    ApiResponse, ErrorCode,
    fees::{requests::FeeListParams, responses::FeeStats},
};
use crate::services::storage_error_response;

pub async fn fee_stats(
    service: &FeeService,
    query: FeeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_fees_filtered(&query.filter, query.sort_by, query.sort_order, None)
        .await
    {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            FeeStats::from_records(&records),
            "Fee statistics retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to compute fee statistics",
            e,
        )),
    }
}
