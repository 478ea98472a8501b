use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::SalaryStatus;
use crate::models::common::{
    ExportParams, PaginationQuery, SortOrder, pagination::deserialize_optional_i64,
};
use crate::models::fees::entities::PaymentMethod;

crate::define_sort_fields!(SalarySortField, "../frontend/src/types/generated/salary.ts", default = Period, {
    Period,
    NetPay,
    StaffName,
});

// 单条工资创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct CreateSalaryRequest {
    pub staff_id: i64,
    pub period: String,
    /// 缺省时取员工基本工资
    pub basic_salary: Option<f64>,
    #[serde(default)]
    pub allowances: f64,
    #[serde(default)]
    pub deductions: f64,
    #[serde(default)]
    pub tax: f64,
    pub notes: Option<String>,
}

// 按月生成工资单
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct GeneratePayrollRequest {
    pub period: String,
}

// 工资更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct UpdateSalaryRequest {
    pub allowances: Option<f64>,
    pub deductions: Option<f64>,
    pub tax: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<SalaryStatus>,
}

// 批量发放
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct PaySalariesRequest {
    pub ids: Vec<i64>,
    pub method: PaymentMethod,
    pub paid_on: Option<NaiveDate>,
}

// 工资筛选条件
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct SalaryFilter {
    pub period: Option<String>,
    pub status: Option<SalaryStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | null")]
    pub staff_id: Option<i64>,
    pub department: Option<String>,
    pub search: Option<String>,
}

// 工资列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct SalaryListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: SalaryFilter,
    #[serde(default)]
    pub sort_by: SalarySortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 工资导出参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct SalaryExportParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub export: ExportParams,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: SalaryFilter,
    #[serde(default)]
    pub sort_by: SalarySortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 工资列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SalaryListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub filter: SalaryFilter,
    pub sort_by: SalarySortField,
    pub sort_order: SortOrder,
}
