use super::entities::User;
use crate::models::common::PaginationInfo;
use crate::models::staff::entities::Staff;
use serde::Serialize;
use ts_rs::TS;

/// 单个账号详情
///
/// `staff` 为与账号邮箱相同的教职工档案，教师账号据此确定作业归属。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
    pub staff: Option<Staff>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}
