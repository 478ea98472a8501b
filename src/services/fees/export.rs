use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::FeeService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    fees::{entities::FeeRecord, requests::FeeExportParams},
};
use crate::services::storage_error_response;
use crate::utils::export::{Table, attachment_response};

pub(crate) fn fees_table(records: &[FeeRecord]) -> Table {
    let mut table = Table::new(
        "Fees",
        vec![
            "Admission No",
            "Student",
            "Class",
            "Session",
            "Term",
            "Fee Type",
            "Description",
            "Amount Due",
            "Discount",
            "Amount Paid",
            "Balance",
            "Due Date",
            "Status",
        ],
    );
    for r in records {
        table.push_row(vec![
            r.admission_no.as_str().into(),
            r.student_name.as_str().into(),
            r.class_name.as_str().into(),
            r.session.as_str().into(),
            r.term.as_str().into(),
            r.fee_type.as_str().into(),
            r.description.clone().into(),
            r.amount_due.into(),
            r.discount.into(),
            r.amount_paid.into(),
            r.balance.into(),
            r.due_date.map(|d| d.to_string()).into(),
            r.status.as_str().into(),
        ]);
    }
    table
}

pub async fn export_fees(
    service: &FeeService,
    query: FeeExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let max_rows = AppConfig::get().export.max_rows;

    let records = match storage
        .list_fees_filtered(&query.filter, query.sort_by, query.sort_order, Some(max_rows))
        .await
    {
        Ok(records) => records,
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::ExportFailed,
                "Failed to load fee records for export",
                e,
            ));
        }
    };

    let table = fees_table(&records);
    match table.render(query.export.format) {
        Ok(body) => {
            info!("Exported {} fee records", table.row_count());
            Ok(attachment_response(query.export.format, "fees", body))
        }
        Err(e) => {
            error!("Fee export failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("导出失败: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Term;
    use crate::models::fees::entities::{FeeStatus, FeeType};
    use chrono::Utc;

    fn record(id: i64) -> FeeRecord {
        FeeRecord {
            id,
            student_id: id,
            admission_no: format!("ADM{id:03}"),
            student_name: format!("Student {id}"),
            class_name: "JSS3".into(),
            session: "2024/2025".into(),
            term: Term::First,
            fee_type: FeeType::Tuition,
            description: None,
            amount_due: 45000.0,
            discount: 0.0,
            amount_paid: 15000.0,
            balance: 30000.0,
            due_date: None,
            status: FeeStatus::Partial,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fee_export_row_per_record() {
        let records: Vec<FeeRecord> = (1..=7).map(record).collect();
        let csv = fees_table(&records).to_csv().unwrap();
        let text = String::from_utf8(csv).unwrap();
        // 表头 + 7 行
        assert_eq!(text.lines().count(), 8);
        assert!(text.lines().nth(1).unwrap().contains("30000"));

        let empty = fees_table(&[]).to_csv().unwrap();
        assert_eq!(String::from_utf8(empty).unwrap().lines().count(), 1);
    }
}
