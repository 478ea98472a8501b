use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StaffService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    staff::{entities::Staff, requests::StaffExportParams},
};
use crate::services::storage_error_response;
use crate::utils::export::{Table, attachment_response};

pub(crate) fn staff_table(staff: &[Staff]) -> Table {
    let mut table = Table::new(
        "Staff",
        vec![
            "Staff No",
            "Name",
            "Email",
            "Phone",
            "Position",
            "Department",
            "Subjects",
            "Classes",
            "Employment Type",
            "Base Salary",
            "Status",
            "Hired On",
        ],
    );
    for s in staff {
        table.push_row(vec![
            s.staff_no.as_str().into(),
            s.full_name().into(),
            s.email.as_str().into(),
            s.phone.as_str().into(),
            s.position.as_str().into(),
            s.department.as_str().into(),
            s.subjects.join("; ").into(),
            s.classes.join("; ").into(),
            s.employment_type.as_str().into(),
            s.base_salary.into(),
            s.status.as_str().into(),
            s.hired_on.to_string().into(),
        ]);
    }
    table
}

pub async fn export_staff(
    service: &StaffService,
    query: StaffExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let max_rows = AppConfig::get().export.max_rows;

    let staff = match storage
        .list_staff_filtered(&query.filter, query.sort_by, query.sort_order, Some(max_rows))
        .await
    {
        Ok(staff) => staff,
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::ExportFailed,
                "Failed to load staff for export",
                e,
            ));
        }
    };

    let table = staff_table(&staff);
    match table.render(query.export.format) {
        Ok(body) => {
            info!("Exported {} staff records", table.row_count());
            Ok(attachment_response(query.export.format, "staff", body))
        }
        Err(e) => {
            error!("Staff export failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("导出失败: {e}"),
                )),
            )
        }
    }
}
