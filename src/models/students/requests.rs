use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Gender, StudentStatus};
use crate::models::common::{ExportParams, PaginationQuery, SortOrder};

crate::define_sort_fields!(StudentSortField, "../frontend/src/types/generated/student.ts", default = Name, {
    Name,
    AdmissionNo,
    ClassName,
    EnrolledOn,
    CreatedAt,
});

// 学生创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub class_name: String,
    pub section: Option<String>,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Option<StudentStatus>,
    pub enrolled_on: Option<NaiveDate>,
}

// 学生更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Option<StudentStatus>,
}

// 学生筛选条件（列表、统计、导出共用）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentFilter {
    pub class_name: Option<String>,
    pub status: Option<StudentStatus>,
    pub gender: Option<Gender>,
    pub search: Option<String>,
}

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: StudentFilter,
    #[serde(default)]
    pub sort_by: StudentSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 学生导出参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentExportParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub export: ExportParams,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: StudentFilter,
    #[serde(default)]
    pub sort_by: StudentSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub filter: StudentFilter,
    pub sort_by: StudentSortField,
    pub sort_order: SortOrder,
}
