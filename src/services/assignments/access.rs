//! 作业归属校验
//!
//! 教师账号通过邮箱与教职工档案关联，只能管理关联到自己的作业；管理员不受限制。

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::Storage;

/// 当前操作者的身份
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Admin,
    /// 关联到的教职工 ID
    Teacher(i64),
}

impl Actor {
    /// 是否可以管理归属于 `staff_id` 的作业
    pub fn can_manage(&self, staff_id: Option<i64>) -> bool {
        match self {
            Actor::Admin => true,
            Actor::Teacher(own) => staff_id == Some(*own),
        }
    }
}

/// 解析当前用户身份；失败时返回可直接响应的错误
pub async fn resolve_actor(
    storage: &dyn Storage,
    request: &HttpRequest,
) -> Result<Actor, HttpResponse> {
    let user = match RequireJWT::extract_user(request) {
        Some(user) => user,
        None => {
            return Err(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if user.is_admin() {
        return Ok(Actor::Admin);
    }

    match storage.get_staff_by_email(&user.email).await {
        Ok(Some(staff)) => Ok(Actor::Teacher(staff.id)),
        Ok(None) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AssignmentPermissionDenied,
            "当前账号未关联教职工档案",
        ))),
        Err(e) => Err(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to resolve staff record",
            e,
        )),
    }
}

pub fn permission_denied() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::AssignmentPermissionDenied,
        "只能管理自己负责的作业",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_can_manage() {
        assert!(Actor::Admin.can_manage(None));
        assert!(Actor::Admin.can_manage(Some(3)));
        assert!(Actor::Teacher(3).can_manage(Some(3)));
        assert!(!Actor::Teacher(3).can_manage(Some(4)));
        assert!(!Actor::Teacher(3).can_manage(None));
    }
}
