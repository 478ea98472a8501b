use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{FeeStatus, FeeType, PaymentMethod};
use crate::models::common::{
    ExportParams, PaginationQuery, SortOrder, Term, pagination::deserialize_optional_i64,
};

crate::define_sort_fields!(FeeSortField, "../frontend/src/types/generated/fee.ts", default = DueDate, {
    DueDate,
    AmountDue,
    Balance,
    CreatedAt,
});

// 收费项目创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct CreateFeeRequest {
    pub student_id: i64,
    pub session: String,
    pub term: Term,
    pub fee_type: FeeType,
    pub description: Option<String>,
    pub amount_due: f64,
    #[serde(default)]
    pub discount: f64,
    pub due_date: Option<NaiveDate>,
}

// 按班级批量创建收费项目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct BulkCreateFeesRequest {
    pub class_name: String,
    pub session: String,
    pub term: Term,
    pub fee_type: FeeType,
    pub description: Option<String>,
    pub amount_due: f64,
    #[serde(default)]
    pub discount: f64,
    pub due_date: Option<NaiveDate>,
}

// 收费项目更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct UpdateFeeRequest {
    pub amount_due: Option<f64>,
    pub discount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

// 登记缴费请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct RecordPaymentRequest {
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub paid_on: Option<NaiveDate>,
}

// 收费筛选条件（列表、统计、导出共用）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeFilter {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | null")]
    pub student_id: Option<i64>,
    pub class_name: Option<String>,
    pub session: Option<String>,
    pub term: Option<Term>,
    pub fee_type: Option<FeeType>,
    pub status: Option<FeeStatus>,
    pub search: Option<String>,
}

// 收费列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: FeeFilter,
    #[serde(default)]
    pub sort_by: FeeSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 收费导出参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeExportParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub export: ExportParams,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: FeeFilter,
    #[serde(default)]
    pub sort_by: FeeSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 收费列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct FeeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub filter: FeeFilter,
    pub sort_by: FeeSortField,
    pub sort_order: SortOrder,
}
