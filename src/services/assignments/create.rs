use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use super::access::{Actor, permission_denied, resolve_actor};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{entities::MAX_TITLE_LENGTH, requests::CreateAssignmentRequest},
};
use crate::services::storage_error_response;
use crate::storage::Storage;
use crate::utils::validate::validate_required;

pub(crate) fn validate_assignment(req: &CreateAssignmentRequest) -> Result<(), String> {
    validate_required(&req.title, MAX_TITLE_LENGTH).map_err(|m| format!("title {m}"))?;
    validate_required(&req.subject, 100).map_err(|m| format!("subject {m}"))?;
    validate_required(&req.class_name, 50).map_err(|m| format!("class_name {m}"))?;
    validate_max_score(req.max_score)?;
    Ok(())
}

pub(crate) fn validate_max_score(max_score: f64) -> Result<(), String> {
    if !max_score.is_finite() || max_score <= 0.0 {
        return Err("max_score 必须大于 0".to_string());
    }
    Ok(())
}

/// 指定的教职工必须存在；返回 `None` 表示校验通过
pub(crate) async fn check_staff_exists(
    storage: &dyn Storage,
    staff_id: Option<i64>,
) -> Option<HttpResponse> {
    let staff_id = staff_id?;
    match storage.get_staff_by_id(staff_id).await {
        Ok(Some(_)) => None,
        Ok(None) => Some(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            format!("教职工 {staff_id} 不存在"),
        ))),
        Err(e) => Some(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to check staff",
            e,
        )),
    }
}

pub async fn create_assignment(
    service: &AssignmentService,
    mut req: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_assignment(&req) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AssignmentInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let actor = match resolve_actor(storage.as_ref(), request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    // 教师创建的作业默认归属自己
    if let Actor::Teacher(own) = actor {
        let staff_id = *req.staff_id.get_or_insert(own);
        if !actor.can_manage(Some(staff_id)) {
            return Ok(permission_denied());
        }
    }

    if let Some(resp) = check_staff_exists(storage.as_ref(), req.staff_id).await {
        return Ok(resp);
    }

    match storage.create_assignment(req).await {
        Ok(assignment) => {
            info!("Assignment {} created: {}", assignment.id, assignment.title);
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => Ok(storage_error_response(
            ErrorCode::AssignmentInvalid,
            "Assignment creation failed",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: "Fractions worksheet".to_string(),
            description: None,
            subject: "Mathematics".to_string(),
            class_name: "JSS1".to_string(),
            staff_id: None,
            due_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            max_score: 20.0,
            status: None,
        }
    }

    #[test]
    fn test_validate_assignment() {
        assert!(validate_assignment(&request()).is_ok());

        let mut blank = request();
        blank.title = "   ".to_string();
        assert!(validate_assignment(&blank).is_err());

        let mut long = request();
        long.title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_assignment(&long).is_err());

        let mut zero = request();
        zero.max_score = 0.0;
        assert!(validate_assignment(&zero).is_err());
    }
}
