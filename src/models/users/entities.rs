use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_str_enum! {
    /// 操作员角色，每个账号只有一个
    UserRole, "../frontend/src/types/generated/user.ts", {
        Admin => "admin",
        Bursar => "bursar",
        Teacher => "teacher",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [UserRole] {
        &[UserRole::Admin]
    }

    /// 收费与工资
    pub fn finance_roles() -> &'static [UserRole] {
        &[UserRole::Admin, UserRole::Bursar]
    }

    /// 成绩与作业
    pub fn academic_roles() -> &'static [UserRole] {
        &[UserRole::Admin, UserRole::Teacher]
    }

    pub fn all_roles() -> &'static [UserRole] {
        UserRole::ALL
    }
}

crate::define_str_enum! {
    /// 只有 `active` 的账号可以登录和刷新令牌
    UserStatus, "../frontend/src/types/generated/user.ts", {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_strings() {
        for role in UserRole::all_roles() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, *role);
        }
        assert_eq!(" Bursar ".parse::<UserRole>(), Ok(UserRole::Bursar));
        assert!("user".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_sets() {
        assert!(UserRole::finance_roles().contains(&UserRole::Bursar));
        assert!(!UserRole::finance_roles().contains(&UserRole::Teacher));
        assert!(UserRole::academic_roles().contains(&UserRole::Teacher));
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: 1,
            username: "admin".into(),
            email: "admin@localhost".into(),
            password_hash: "secret-hash".into(),
            role: UserRole::Admin,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
