use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::models::{
    ApiResponse, ErrorCode,
    fees::requests::{FeeListParams, FeeListQuery},
};
use crate::services::storage_error_response;

pub async fn list_fees(
    service: &FeeService,
    query: FeeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = FeeListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        filter: query.filter,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    match storage.list_fees_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Fee list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to retrieve fee list",
            e,
        )),
    }
}
