use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AssignmentStatus;
use crate::models::common::{PaginationQuery, SortOrder, pagination::deserialize_optional_i64};

crate::define_sort_fields!(AssignmentSortField, "../frontend/src/types/generated/assignment.ts", default = DueDate, {
    DueDate,
    Title,
    CreatedAt,
});

// 作业创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub class_name: String,
    pub staff_id: Option<i64>,
    pub due_date: NaiveDate,
    pub max_score: f64,
    pub status: Option<AssignmentStatus>,
}

// 作业更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub class_name: Option<String>,
    pub staff_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub max_score: Option<f64>,
    pub status: Option<AssignmentStatus>,
}

// 作业筛选条件
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentFilter {
    pub class_name: Option<String>,
    pub subject: Option<String>,
    pub status: Option<AssignmentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | null")]
    pub staff_id: Option<i64>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    pub search: Option<String>,
}

// 作业列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: AssignmentFilter,
    #[serde(default)]
    pub sort_by: AssignmentSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 作业列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub filter: AssignmentFilter,
    pub sort_by: AssignmentSortField,
    pub sort_order: SortOrder,
}
