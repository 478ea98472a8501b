use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StaffService;
use crate::models::{
    ApiResponse, ErrorCode,
    staff::requests::CreateStaffRequest,
};
use crate::services::storage_error_response;
use crate::utils::validate::{
    validate_amount, validate_code, validate_email, validate_phone, validate_required,
};

pub(crate) const MAX_NAME_LENGTH: usize = 100;

pub(crate) fn validate_staff(req: &CreateStaffRequest) -> Result<(), String> {
    validate_code(&req.staff_no)?;
    for (field, value) in [
        ("first_name", &req.first_name),
        ("last_name", &req.last_name),
        ("department", &req.department),
    ] {
        validate_required(value, MAX_NAME_LENGTH).map_err(|m| format!("{field} {m}"))?;
    }
    validate_email(req.email.trim())?;
    validate_phone(&req.phone)?;
    validate_amount(req.base_salary)?;
    Ok(())
}

pub async fn create_staff(
    service: &StaffService,
    staff_data: CreateStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_staff(&staff_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::StaffInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 工号、邮箱唯一
    match storage
        .staff_identity_taken(
            Some(staff_data.staff_no.trim()),
            Some(staff_data.email.trim()),
            None,
        )
        .await
    {
        Ok(true) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StaffAlreadyExists,
                "工号或邮箱已存在",
            )));
        }
        Ok(false) => {}
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::InternalServerError,
                "Failed to check staff identity",
                e,
            ));
        }
    }

    match storage.create_staff(staff_data).await {
        Ok(staff) => {
            info!("Staff {} created", staff.staff_no);
            Ok(HttpResponse::Created().json(ApiResponse::success(staff, "教职工创建成功")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::StaffAlreadyExists, "工号或邮箱已存在"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Staff creation failed",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::staff::entities::{EmploymentType, StaffPosition};

    fn request() -> CreateStaffRequest {
        CreateStaffRequest {
            staff_no: "STF-014".into(),
            first_name: "Kemi".into(),
            last_name: "Bello".into(),
            email: "Kemi.Bello@School.test".into(),
            phone: "08055550000".into(),
            position: StaffPosition::Teacher,
            department: "Sciences".into(),
            subjects: vec!["Biology".into()],
            classes: vec!["SS1".into()],
            qualification: Some("B.Sc".into()),
            employment_type: EmploymentType::FullTime,
            base_salary: 180000.0,
            status: None,
            hired_on: None,
        }
    }

    #[test]
    fn test_validate_staff() {
        assert!(validate_staff(&request()).is_ok());

        let mut req = request();
        req.base_salary = -1.0;
        assert!(validate_staff(&req).is_err());

        let mut req = request();
        req.email = "kemi".into();
        assert!(validate_staff(&req).is_err());

        let mut req = request();
        req.department = "".into();
        assert!(validate_staff(&req).unwrap_err().starts_with("department"));
    }
}
