use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
    users::entities::UserStatus,
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

const BAD_CREDENTIALS: &str = "用户名或密码错误";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let jwt_config = &service.get_config().jwt;

    let identifier = login_request.username.trim();
    if identifier.is_empty() || login_request.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "用户名和密码不能为空",
        )));
    }

    let user = match storage.get_user_by_username_or_email(identifier).await {
        Ok(Some(user)) if verify_password(&login_request.password, &user.password_hash) => user,
        // 账号不存在与密码错误返回相同信息
        Ok(_) => {
            info!("Failed login attempt for '{}'", identifier);
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::AuthFailed, BAD_CREDENTIALS)));
        }
        Err(e) => {
            error!("Login lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "登录失败，请稍后重试",
            )));
        }
    };

    if user.status != UserStatus::Active {
        warn!("Disabled account {} attempted to log in", user.username);
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "账号已停用，请联系管理员",
        )));
    }

    let refresh_days = if login_request.remember_me {
        jwt_config.refresh_token_remember_me_expiry
    } else {
        jwt_config.refresh_token_expiry
    };

    let tokens = match user.generate_token_pair(Some(chrono::Duration::days(refresh_days))) {
        Ok(tokens) => tokens,
        Err(e) => {
            error!("{}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "登录失败，无法生成令牌",
            )));
        }
    };

    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to record last login for user {}: {}", user.id, e);
    }
    info!("User {} ({}) logged in", user.username, user.role);

    let cookie = JwtUtils::create_refresh_token_cookie(&tokens.refresh_token, refresh_days);
    let response = LoginResponse {
        access_token: tokens.access_token,
        token_type: "Bearer".to_string(),
        expires_in: jwt_config.access_token_expiry * 60,
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(response, "登录成功")))
}
