use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use super::access::{permission_denied, resolve_actor};
use super::create::{check_staff_exists, validate_max_score};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{entities::MAX_TITLE_LENGTH, requests::UpdateAssignmentRequest},
};
use crate::services::storage_error_response;
use crate::utils::validate::validate_required;

fn validate_update(update: &UpdateAssignmentRequest) -> Result<(), String> {
    if let Some(title) = &update.title {
        validate_required(title, MAX_TITLE_LENGTH).map_err(|m| format!("title {m}"))?;
    }
    if let Some(subject) = &update.subject {
        validate_required(subject, 100).map_err(|m| format!("subject {m}"))?;
    }
    if let Some(class_name) = &update.class_name {
        validate_required(class_name, 50).map_err(|m| format!("class_name {m}"))?;
    }
    if let Some(max_score) = update.max_score {
        validate_max_score(max_score)?;
    }
    Ok(())
}

pub async fn update_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    update: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_update(&update) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AssignmentInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let existing = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::InternalServerError,
                "Failed to get assignment",
                e,
            ));
        }
    };

    let actor = match resolve_actor(storage.as_ref(), request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    // 教师不能把作业转给其他人
    if !actor.can_manage(existing.staff_id)
        || (update.staff_id.is_some() && !actor.can_manage(update.staff_id))
    {
        return Ok(permission_denied());
    }

    if let Some(resp) = check_staff_exists(storage.as_ref(), update.staff_id).await {
        return Ok(resp);
    }

    match storage.update_assignment(assignment_id, update).await {
        Ok(Some(assignment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::AssignmentInvalid,
            "Failed to update assignment",
            e,
        )),
    }
}
