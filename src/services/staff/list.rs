use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::models::{
    ApiResponse, ErrorCode,
    staff::requests::{StaffListParams, StaffListQuery},
};
use crate::services::storage_error_response;

pub async fn list_staff(
    service: &StaffService,
    query: StaffListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = StaffListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        filter: query.filter,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    match storage.list_staff_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Staff list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to retrieve staff list",
            e,
        )),
    }
}
