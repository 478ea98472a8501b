use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::CreateStudentRequest, responses::StudentResponse},
};
use crate::services::storage_error_response;
use crate::utils::validate::{
    validate_code, validate_email, validate_phone, validate_required,
};

/// 姓名、班级等文本字段的最大长度
pub(crate) const MAX_NAME_LENGTH: usize = 100;

/// 校验学生必填字段，返回 (字段名, 错误信息)
pub(crate) fn validate_student(req: &CreateStudentRequest) -> Result<(), (&'static str, String)> {
    validate_code(&req.admission_no).map_err(|m| ("admission_no", m.to_string()))?;
    for (field, value) in [
        ("first_name", &req.first_name),
        ("last_name", &req.last_name),
        ("class_name", &req.class_name),
        ("guardian_name", &req.guardian_name),
    ] {
        validate_required(value, MAX_NAME_LENGTH).map_err(|m| (field, format!("{field} {m}")))?;
    }
    validate_phone(&req.guardian_phone).map_err(|m| ("guardian_phone", m.to_string()))?;
    if let Some(email) = req.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email.trim()).map_err(|m| ("email", m.to_string()))?;
    }
    Ok(())
}

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err((_, msg)) = validate_student(&student_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::StudentInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 学号唯一
    match storage
        .get_student_by_admission_no(student_data.admission_no.trim())
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "学号已存在",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::StudentCreationFailed,
                "Failed to check admission number",
                e,
            ));
        }
    }

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} created", student.admission_no);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(StudentResponse { student }, "学生创建成功")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::StudentAlreadyExists, "学号已存在"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::StudentCreationFailed,
            "Student creation failed",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::Gender;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            admission_no: "ADM/2024/001".into(),
            first_name: "Amaka".into(),
            last_name: "Eze".into(),
            gender: Gender::Female,
            date_of_birth: None,
            class_name: "JSS1".into(),
            section: Some("A".into()),
            guardian_name: "Ngozi Eze".into(),
            guardian_phone: "+234 803 000 0000".into(),
            email: None,
            address: None,
            status: None,
            enrolled_on: None,
        }
    }

    #[test]
    fn test_validate_student_accepts_valid_record() {
        assert!(validate_student(&request()).is_ok());
    }

    #[test]
    fn test_validate_student_reports_field() {
        let mut req = request();
        req.guardian_name = "   ".into();
        assert_eq!(validate_student(&req).unwrap_err().0, "guardian_name");

        let mut req = request();
        req.guardian_phone = "call me".into();
        assert_eq!(validate_student(&req).unwrap_err().0, "guardian_phone");

        let mut req = request();
        req.email = Some("not-an-email".into());
        assert_eq!(validate_student(&req).unwrap_err().0, "email");

        let mut req = request();
        req.admission_no = "".into();
        assert_eq!(validate_student(&req).unwrap_err().0, "admission_no");
    }
}
