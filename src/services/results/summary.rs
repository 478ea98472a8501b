use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::{
    ApiResponse, ErrorCode, SortOrder,
    results::{
        requests::{ClassSummaryParams, ResultFilter, ResultSortField},
        responses::ClassSummary,
    },
};
use crate::services::storage_error_response;

pub async fn class_summary(
    service: &ResultService,
    query: ClassSummaryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let filter = ResultFilter {
        class_name: Some(query.class_name.clone()),
        session: Some(query.session.clone()),
        term: Some(query.term),
        ..Default::default()
    };

    match storage
        .list_term_results_filtered(&filter, ResultSortField::StudentName, SortOrder::Asc, None)
        .await
    {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassSummary::build(&query.class_name, &query.session, query.term, &results),
            "Class summary retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to build class summary",
            e,
        )),
    }
}
