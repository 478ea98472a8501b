use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_str_enum! {
    /// 作业状态
    AssignmentStatus, "../frontend/src/types/generated/assignment.ts", {
        Draft => "draft",
        Published => "published",
        Closed => "closed",
    }
}

/// 标题最大长度
pub const MAX_TITLE_LENGTH: usize = 200;

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub class_name: String,
    pub staff_id: Option<i64>,
    pub staff_name: Option<String>,
    pub due_date: NaiveDate,
    pub max_score: f64,
    pub status: AssignmentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
