use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ResultService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    results::{entities::TermResult, requests::ResultExportParams},
};
use crate::services::storage_error_response;
use crate::utils::export::{Table, attachment_response};

pub(crate) fn results_table(results: &[TermResult]) -> Table {
    let mut table = Table::new(
        "Results",
        vec![
            "Admission No",
            "Student",
            "Class",
            "Session",
            "Term",
            "Subject",
            "CA",
            "Exam",
            "Total",
            "Grade",
            "Remark",
        ],
    );
    for r in results {
        table.push_row(vec![
            r.admission_no.as_str().into(),
            r.student_name.as_str().into(),
            r.class_name.as_str().into(),
            r.session.as_str().into(),
            r.term.as_str().into(),
            r.subject.as_str().into(),
            r.ca_score.into(),
            r.exam_score.into(),
            r.total.into(),
            r.grade.as_str().into(),
            r.remark.as_str().into(),
        ]);
    }
    table
}

pub async fn export_results(
    service: &ResultService,
    query: ResultExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let max_rows = AppConfig::get().export.max_rows;

    let results = match storage
        .list_term_results_filtered(&query.filter, query.sort_by, query.sort_order, Some(max_rows))
        .await
    {
        Ok(results) => results,
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::ExportFailed,
                "Failed to load results for export",
                e,
            ));
        }
    };

    let table = results_table(&results);
    match table.render(query.export.format) {
        Ok(body) => {
            info!("Exported {} results", table.row_count());
            Ok(attachment_response(query.export.format, "results", body))
        }
        Err(e) => {
            error!("Result export failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("导出失败: {e}"),
                )),
            )
        }
    }
}
