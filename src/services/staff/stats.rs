use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::models::{
    ApiResponse, ErrorCode,
    staff::{requests::StaffListParams, responses::StaffStatsResponse},
};
use crate::services::storage_error_response;

pub async fn staff_stats(
    service: &StaffService,
    query: StaffListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_staff_filtered(&query.filter, query.sort_by, query.sort_order, None)
        .await
    {
        Ok(staff) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StaffStatsResponse::from_staff(&staff),
            "Staff statistics retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to compute staff statistics",
            e,
        )),
    }
}
