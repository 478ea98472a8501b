use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SalaryService;
use crate::models::{
    ApiResponse, ErrorCode,
    salaries::requests::{SalaryListParams, SalaryListQuery},
};
use crate::services::storage_error_response;

pub async fn list_salaries(
    service: &SalaryService,
    query: SalaryListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = SalaryListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        filter: query.filter,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    match storage.list_salaries_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Salary list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to retrieve salary list",
            e,
        )),
    }
}
