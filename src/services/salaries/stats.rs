use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SalaryService;
use crate::models::{
    ApiResponse, ErrorCode,
    salaries::{requests::SalaryListParams, responses::SalaryStats},
};
use crate::services::storage_error_response;

pub async fn salary_stats(
    service: &SalaryService,
    query: SalaryListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_salaries_filtered(&query.filter, query.sort_by, query.sort_order, None)
        .await
    {
        Ok(salaries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SalaryStats::from_salaries(&salaries),
            "Salary statistics retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to compute salary statistics",
            e,
        )),
    }
}
