use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EmploymentType, StaffPosition, StaffStatus};
use crate::models::common::{ExportParams, PaginationQuery, SortOrder};

crate::define_sort_fields!(StaffSortField, "../frontend/src/types/generated/staff.ts", default = Name, {
    Name,
    StaffNo,
    HiredOn,
    BaseSalary,
});

// 教职工创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct CreateStaffRequest {
    pub staff_no: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: StaffPosition,
    pub department: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    pub qualification: Option<String>,
    pub employment_type: EmploymentType,
    pub base_salary: f64,
    pub status: Option<StaffStatus>,
    pub hired_on: Option<NaiveDate>,
}

// 教职工更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct UpdateStaffRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<StaffPosition>,
    pub department: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub classes: Option<Vec<String>>,
    pub qualification: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub base_salary: Option<f64>,
    pub status: Option<StaffStatus>,
}

// 教职工筛选条件
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffFilter {
    pub position: Option<StaffPosition>,
    pub department: Option<String>,
    pub status: Option<StaffStatus>,
    pub employment_type: Option<EmploymentType>,
    pub search: Option<String>,
}

// 教职工列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: StaffFilter,
    #[serde(default)]
    pub sort_by: StaffSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 教职工导出参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffExportParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub export: ExportParams,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: StaffFilter,
    #[serde(default)]
    pub sort_by: StaffSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 教职工列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StaffListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub filter: StaffFilter,
    pub sort_by: StaffSortField,
    pub sort_order: SortOrder,
}
