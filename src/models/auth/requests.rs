use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名或邮箱均可
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
    /// 勾选后 refresh token 使用 `jwt.refresh_token_remember_me_expiry`
    #[serde(default)]
    pub remember_me: bool,
}

/// 当前账号自助修改资料，修改密码时必须提供原密码
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub password: Option<String>,
    pub current_password: Option<String>,
}
