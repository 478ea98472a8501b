//! 学生批量导入

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use tracing::{error, info};

use super::StudentService;
use super::create::validate_student;
use crate::config::AppConfig;
use crate::models::students::entities::{Gender, StudentStatus};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::students::responses::{ImportRowError, StudentImportResponse};
use crate::models::{ApiResponse, ErrorCode, ExportFormat};
use crate::utils::dates::parse_date;
use crate::utils::export::{Table, attachment_response};
use crate::utils::import::{ImportRow, parse_sheet, read_file_from_multipart};

const REQUIRED_COLUMNS: [&str; 7] = [
    "admission_no",
    "first_name",
    "last_name",
    "gender",
    "class_name",
    "guardian_name",
    "guardian_phone",
];

const TEMPLATE_COLUMNS: [&str; 13] = [
    "admission_no",
    "first_name",
    "last_name",
    "gender",
    "date_of_birth",
    "class_name",
    "section",
    "guardian_name",
    "guardian_phone",
    "email",
    "address",
    "status",
    "enrolled_on",
];

fn row_error(row: usize, field: &str, message: impl Into<String>) -> ImportRowError {
    ImportRowError {
        row,
        field: field.to_string(),
        message: message.into(),
    }
}

fn optional_date(row: &ImportRow<'_>, column: &str) -> Result<Option<chrono::NaiveDate>, ImportRowError> {
    match row.optional(column) {
        None => Ok(None),
        Some(value) => parse_date(&value).map(Some).ok_or_else(|| {
            row_error(row.row_num, column, format!("无法识别的日期: {value}"))
        }),
    }
}

/// 将一行转换为创建请求并校验
fn parse_student_row(row: &ImportRow<'_>) -> Result<CreateStudentRequest, ImportRowError> {
    let gender = row
        .get("gender")
        .parse::<Gender>()
        .map_err(|e| row_error(row.row_num, "gender", e))?;
    let status = row
        .optional("status")
        .map(|s| s.parse::<StudentStatus>())
        .transpose()
        .map_err(|e| row_error(row.row_num, "status", e))?;

    let req = CreateStudentRequest {
        admission_no: row.get("admission_no").to_string(),
        first_name: row.get("first_name").to_string(),
        last_name: row.get("last_name").to_string(),
        gender,
        date_of_birth: optional_date(row, "date_of_birth")?,
        class_name: row.get("class_name").to_string(),
        section: row.optional("section"),
        guardian_name: row.get("guardian_name").to_string(),
        guardian_phone: row.get("guardian_phone").to_string(),
        email: row.optional("email"),
        address: row.optional("address"),
        status,
        enrolled_on: optional_date(row, "enrolled_on")?,
    };

    validate_student(&req).map_err(|(field, msg)| row_error(row.row_num, field, msg))?;
    Ok(req)
}

/// 导入学生
pub async fn import_students(
    service: &StudentService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 读取文件内容
    let (file_bytes, file_name) = match read_file_from_multipart(&mut payload).await {
        Ok(result) => result,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ImportFileUploadFailed,
                format!("文件读取失败: {e}"),
            )));
        }
    };

    let sheet = match parse_sheet(&file_bytes, &file_name) {
        Ok(sheet) => sheet,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    if let Err(e) = sheet.require_columns(&REQUIRED_COLUMNS) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(e.error_code(), e.message())));
    }

    if sheet.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            "文件中没有数据行",
        )));
    }

    let max_rows = AppConfig::get().import.max_rows;
    if sheet.len() > max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!("单次导入最多支持 {max_rows} 行"),
        )));
    }

    // 验证并过滤数据
    let mut errors: Vec<ImportRowError> = Vec::new();
    let mut valid_rows: Vec<(usize, CreateStudentRequest)> = Vec::new();
    let mut failed = 0;

    for row in sheet.iter() {
        match parse_student_row(&row) {
            Ok(req) => valid_rows.push((row.row_num, req)),
            Err(e) => {
                failed += 1;
                errors.push(e);
            }
        }
    }

    // 批量检查学号冲突
    let admission_nos: Vec<String> = valid_rows
        .iter()
        .map(|(_, r)| r.admission_no.trim().to_string())
        .collect();
    let existing: HashSet<String> = match storage.check_admission_nos_exist(&admission_nos).await {
        Ok(list) => list.into_iter().collect(),
        Err(e) => {
            error!("检查学号失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("检查学号失败: {e}"),
                )),
            );
        }
    };

    let mut skipped = 0;
    let mut success = 0;
    let mut seen: HashSet<String> = HashSet::new();

    for (row_num, req) in valid_rows {
        let admission_no = req.admission_no.trim().to_string();
        if existing.contains(&admission_no) {
            skipped += 1;
            errors.push(row_error(row_num, "admission_no", "学号已存在"));
            continue;
        }
        if !seen.insert(admission_no) {
            skipped += 1;
            errors.push(row_error(row_num, "admission_no", "文件中学号重复"));
            continue;
        }

        match storage.create_student(req).await {
            Ok(_) => success += 1,
            Err(e) if e.is_unique_violation() => {
                skipped += 1;
                errors.push(row_error(row_num, "admission_no", "学号已存在"));
            }
            Err(e) => {
                failed += 1;
                error!("创建学生失败: {}", e);
                errors.push(row_error(row_num, "", format!("创建失败: {e}")));
            }
        }
    }

    info!(
        "Student import finished: total {}, success {}, skipped {}, failed {}",
        sheet.len(),
        success,
        skipped,
        failed
    );

    let response = StudentImportResponse {
        total: sheet.len(),
        success,
        skipped,
        failed,
        errors,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "导入完成")))
}

/// 导入模板：表头加一行示例
pub async fn import_template() -> ActixResult<HttpResponse> {
    let mut table = Table::new("Students", TEMPLATE_COLUMNS.to_vec());
    table.push_row(vec![
        "ADM/2025/001".into(),
        "Chinedu".into(),
        "Okeke".into(),
        "male".into(),
        "2014-03-21".into(),
        "JSS1".into(),
        "A".into(),
        "Ifeoma Okeke".into(),
        "08031234567".into(),
        "".into(),
        "".into(),
        "active".into(),
        "2025-09-08".into(),
    ]);

    match table.to_csv() {
        Ok(body) => Ok(attachment_response(ExportFormat::Csv, "students_template", body)),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ExportFailed,
                format!("模板生成失败: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_row_result(csv: &str) -> Result<CreateStudentRequest, ImportRowError> {
        let sheet = parse_sheet(csv.as_bytes(), "students.csv").unwrap();
        sheet.require_columns(&REQUIRED_COLUMNS).unwrap();
        let row = sheet.iter().next().unwrap();
        parse_student_row(&row)
    }

    const HEADER: &str =
        "admission_no,first_name,last_name,gender,class_name,guardian_name,guardian_phone,date_of_birth,status\n";

    #[test]
    fn test_parse_student_row_valid() {
        let req = first_row_result(&format!(
            "{HEADER}ADM001,Ada,Obi,Female,JSS1,Mr Obi,08030000000,21/03/2014,\n"
        ))
        .unwrap();
        assert_eq!(req.gender, Gender::Female);
        assert_eq!(req.date_of_birth, chrono::NaiveDate::from_ymd_opt(2014, 3, 21));
        assert_eq!(req.status, None);
    }

    #[test]
    fn test_parse_student_row_reports_row_and_field() {
        let err = first_row_result(&format!(
            "{HEADER}ADM001,Ada,Obi,robot,JSS1,Mr Obi,08030000000,,\n"
        ))
        .unwrap_err();
        assert_eq!(err.row, 2);
        assert_eq!(err.field, "gender");

        let err = first_row_result(&format!(
            "{HEADER}ADM001,Ada,Obi,female,JSS1,Mr Obi,08030000000,31/02/2014,\n"
        ))
        .unwrap_err();
        assert_eq!(err.field, "date_of_birth");

        let err = first_row_result(&format!(
            "{HEADER}ADM001,Ada,Obi,female,JSS1,,08030000000,,\n"
        ))
        .unwrap_err();
        assert_eq!(err.field, "guardian_name");
    }

    #[test]
    fn test_template_has_all_required_columns() {
        for column in REQUIRED_COLUMNS {
            assert!(TEMPLATE_COLUMNS.contains(&column));
        }
    }
}
