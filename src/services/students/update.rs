use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use super::create::MAX_NAME_LENGTH;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::UpdateStudentRequest, responses::StudentResponse},
};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_email, validate_phone, validate_required};

fn validate_update(update: &UpdateStudentRequest) -> Result<(), String> {
    for (field, value) in [
        ("first_name", &update.first_name),
        ("last_name", &update.last_name),
        ("class_name", &update.class_name),
        ("guardian_name", &update.guardian_name),
    ] {
        if let Some(value) = value {
            validate_required(value, MAX_NAME_LENGTH).map_err(|m| format!("{field} {m}"))?;
        }
    }
    if let Some(phone) = &update.guardian_phone {
        validate_phone(phone)?;
    }
    if let Some(email) = update.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email.trim())?;
    }
    Ok(())
}

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    update_data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_update(&update_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::StudentInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_student(student_id, update_data).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResponse { student },
            "学生信息更新成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生不存在",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::StudentUpdateFailed,
            "Failed to update student",
            e,
        )),
    }
}
