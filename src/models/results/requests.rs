use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{
    ExportParams, PaginationQuery, SortOrder, Term, pagination::deserialize_optional_i64,
};

crate::define_sort_fields!(ResultSortField, "../frontend/src/types/generated/result.ts", default = StudentName, {
    StudentName,
    Subject,
    Total,
});

/// 成绩表中的一行
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultEntry {
    pub student_id: i64,
    pub ca_score: f64,
    pub exam_score: f64,
}

// 保存成绩表（按学生+科目+学年+学期幂等写入）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SaveResultSheetRequest {
    pub session: String,
    pub term: Term,
    pub subject: String,
    pub entries: Vec<ResultEntry>,
}

// 成绩筛选条件
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultFilter {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | null")]
    pub student_id: Option<i64>,
    pub class_name: Option<String>,
    pub subject: Option<String>,
    pub session: Option<String>,
    pub term: Option<Term>,
    pub search: Option<String>,
}

// 成绩列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: ResultFilter,
    #[serde(default)]
    pub sort_by: ResultSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 成绩导出参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultExportParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub export: ExportParams,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: ResultFilter,
    #[serde(default)]
    pub sort_by: ResultSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// 班级成绩汇总参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ClassSummaryParams {
    pub class_name: String,
    pub session: String,
    pub term: Term,
}

// 成绩列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ResultListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub filter: ResultFilter,
    pub sort_by: ResultSortField,
    pub sort_order: SortOrder,
}
