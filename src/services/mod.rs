pub mod assignments;
pub mod auth;
pub mod dashboard;
pub mod fees;
pub mod results;
pub mod salaries;
pub mod staff;
pub mod students;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use fees::FeeService;
pub use results::ResultService;
pub use salaries::SalaryService;
pub use staff::StaffService;
pub use students::StudentService;
pub use users::UserService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::SchoolAdminError;
use crate::models::{ApiResponse, ErrorCode};

/// 将存储层错误映射为 HTTP 响应
///
/// 校验错误返回 400，唯一约束或状态冲突返回 409，记录缺失返回 404，其余一律 500。
pub(crate) fn storage_error_response(
    code: ErrorCode,
    context: &str,
    e: SchoolAdminError,
) -> HttpResponse {
    match e {
        SchoolAdminError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg))
        }
        SchoolAdminError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(code, msg))
        }
        e if e.is_unique_violation() => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(code, e.message().to_string()))
        }
        e => {
            error!("{}: {}", context, e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(code, format!("{context}: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_storage_error_status_mapping() {
        let cases = [
            (SchoolAdminError::validation("bad"), StatusCode::BAD_REQUEST),
            (SchoolAdminError::not_found("gone"), StatusCode::NOT_FOUND),
            (SchoolAdminError::conflict("paid"), StatusCode::CONFLICT),
            (
                SchoolAdminError::database_operation("UNIQUE constraint failed: staff.email"),
                StatusCode::CONFLICT,
            ),
            (
                SchoolAdminError::database_operation("disk I/O error"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let resp = storage_error_response(ErrorCode::BadRequest, "ctx", err);
            assert_eq!(resp.status(), status);
        }
    }
}
