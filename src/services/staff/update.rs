use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use super::create::MAX_NAME_LENGTH;
use crate::models::{ApiResponse, ErrorCode, staff::requests::UpdateStaffRequest};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_amount, validate_email, validate_phone, validate_required};

fn validate_update(update: &UpdateStaffRequest) -> Result<(), String> {
    for (field, value) in [
        ("first_name", &update.first_name),
        ("last_name", &update.last_name),
        ("department", &update.department),
    ] {
        if let Some(value) = value {
            validate_required(value, MAX_NAME_LENGTH).map_err(|m| format!("{field} {m}"))?;
        }
    }
    if let Some(email) = &update.email {
        validate_email(email.trim())?;
    }
    if let Some(phone) = &update.phone {
        validate_phone(phone)?;
    }
    if let Some(base_salary) = update.base_salary {
        validate_amount(base_salary)?;
    }
    Ok(())
}

pub async fn update_staff(
    service: &StaffService,
    staff_id: i64,
    update_data: UpdateStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_update(&update_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::StaffInvalid, msg)));
    }

    let storage = service.get_storage(request);

    if let Some(email) = &update_data.email {
        match storage
            .staff_identity_taken(None, Some(email.trim()), Some(staff_id))
            .await
        {
            Ok(true) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::StaffAlreadyExists,
                    "该邮箱已被其他教职工使用",
                )));
            }
            Ok(false) => {}
            Err(e) => {
                return Ok(storage_error_response(
                    ErrorCode::InternalServerError,
                    "Failed to check staff email",
                    e,
                ));
            }
        }
    }

    match storage.update_staff(staff_id, update_data).await {
        Ok(Some(staff)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(staff, "教职工信息更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StaffNotFound,
            "教职工不存在",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::StaffInvalid,
            "Failed to update staff",
            e,
        )),
    }
}
