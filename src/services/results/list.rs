use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::{
    ApiResponse, ErrorCode,
    results::requests::{ResultListParams, ResultListQuery},
};
use crate::services::storage_error_response;

pub async fn list_results(
    service: &ResultService,
    query: ResultListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = ResultListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        filter: query.filter,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    match storage.list_term_results_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Result list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to retrieve results",
            e,
        )),
    }
}
