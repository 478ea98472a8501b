use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SalaryService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    salaries::{entities::Salary, requests::SalaryExportParams},
};
use crate::services::storage_error_response;
use crate::utils::export::{Table, attachment_response};
use crate::utils::validate::validate_period;

pub(crate) fn salaries_table(salaries: &[Salary]) -> Table {
    let mut table = Table::new(
        "Salaries",
        vec![
            "Staff No",
            "Staff",
            "Department",
            "Period",
            "Basic",
            "Allowances",
            "Deductions",
            "Tax",
            "Gross",
            "Net",
            "Status",
            "Paid On",
            "Method",
        ],
    );
    for s in salaries {
        table.push_row(vec![
            s.staff_no.as_str().into(),
            s.staff_name.as_str().into(),
            s.department.as_str().into(),
            s.period.as_str().into(),
            s.basic_salary.into(),
            s.allowances.into(),
            s.deductions.into(),
            s.tax.into(),
            s.gross_pay.into(),
            s.net_pay.into(),
            s.status.as_str().into(),
            s.paid_on.map(|d| d.to_string()).into(),
            s.payment_method.map(|m| m.as_str()).into(),
        ]);
    }
    table
}

pub async fn export_salaries(
    service: &SalaryService,
    query: SalaryExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let max_rows = AppConfig::get().export.max_rows;

    let salaries = match storage
        .list_salaries_filtered(&query.filter, query.sort_by, query.sort_order, Some(max_rows))
        .await
    {
        Ok(salaries) => salaries,
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::ExportFailed,
                "Failed to load salaries for export",
                e,
            ));
        }
    };

    let table = salaries_table(&salaries);
    let stem = match query.filter.period.as_deref() {
        Some(period) if validate_period(period.trim()).is_ok() => format!("salaries_{}", period.trim()),
        _ => "salaries".to_string(),
    };
    match table.render(query.export.format) {
        Ok(body) => {
            info!("Exported {} salary records", table.row_count());
            Ok(attachment_response(query.export.format, &stem, body))
        }
        Err(e) => {
            error!("Salary export failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("导出失败: {e}"),
                )),
            )
        }
    }
}
