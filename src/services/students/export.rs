use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{entities::Student, requests::StudentExportParams},
};
use crate::services::storage_error_response;
use crate::utils::export::{Table, attachment_response};

const HEADERS: [&str; 13] = [
    "Admission No",
    "First Name",
    "Last Name",
    "Gender",
    "Date of Birth",
    "Class",
    "Section",
    "Guardian",
    "Guardian Phone",
    "Email",
    "Address",
    "Status",
    "Enrolled On",
];

/// 每条学生记录对应一行
pub(crate) fn students_table(students: &[Student]) -> Table {
    let mut table = Table::new("Students", HEADERS.to_vec());
    for s in students {
        table.push_row(vec![
            s.admission_no.as_str().into(),
            s.first_name.as_str().into(),
            s.last_name.as_str().into(),
            s.gender.as_str().into(),
            s.date_of_birth.map(|d| d.to_string()).into(),
            s.class_name.as_str().into(),
            s.section.clone().into(),
            s.guardian_name.as_str().into(),
            s.guardian_phone.as_str().into(),
            s.email.clone().into(),
            s.address.clone().into(),
            s.status.as_str().into(),
            s.enrolled_on.to_string().into(),
        ]);
    }
    table
}

pub async fn export_students(
    service: &StudentService,
    query: StudentExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let max_rows = AppConfig::get().export.max_rows;

    let students = match storage
        .list_students_filtered(
            &query.filter,
            query.sort_by,
            query.sort_order,
            Some(max_rows),
        )
        .await
    {
        Ok(students) => students,
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::ExportFailed,
                "Failed to load students for export",
                e,
            ));
        }
    };

    let table = students_table(&students);
    match table.render(query.export.format) {
        Ok(body) => {
            info!("Exported {} students", table.row_count());
            Ok(attachment_response(query.export.format, "students", body))
        }
        Err(e) => {
            error!("Student export failed: {}", e);
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
    use crate::models::students::entities::{Gender, StudentStatus};
    use chrono::{NaiveDate, Utc};

    fn student(id: i64) -> Student {
        Student {
            id,
            admission_no: format!("ADM{id:03}"),
            first_name: "Tolu".into(),
            last_name: format!("Ade, {id}"),
            gender: Gender::Male,
            date_of_birth: NaiveDate::from_ymd_opt(2012, 5, 3),
            class_name: "JSS2".into(),
            section: None,
            guardian_name: "Mrs Ade".into(),
            guardian_phone: "08011112222".into(),
            email: None,
            address: Some("12 Allen Avenue,\nIkeja".into()),
            status: StudentStatus::Active,
            enrolled_on: NaiveDate::from_ymd_opt(2023, 9, 11).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_students_csv_has_one_row_per_record() {
        let students: Vec<Student> = (1..=4).map(student).collect();
        let table = students_table(&students);
        assert_eq!(table.row_count(), students.len());

        let csv = table.to_csv().unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_slice());
        assert_eq!(reader.headers().unwrap().len(), HEADERS.len());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), students.len());
        assert_eq!(&rows[0][2], "Ade, 1");
        assert_eq!(&rows[0][10], "12 Allen Avenue,\nIkeja");
        assert_eq!(&rows[3][0], "ADM004");
    }
}
