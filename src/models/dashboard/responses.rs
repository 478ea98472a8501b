use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::Assignment;
use crate::models::common::GroupCount;

/// 学生概况
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentOverview {
    pub total: i64,
    pub active: i64,
    pub by_class: Vec<GroupCount>,
}

/// 教职工概况
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StaffOverview {
    pub total: i64,
    pub active: i64,
}

/// 收费概况
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct FeeOverview {
    pub record_count: i64,
    pub total_due: f64,
    pub total_paid: f64,
    pub total_outstanding: f64,
    pub collection_rate: f64,
}

/// 工资概况
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct PayrollOverview {
    pub period: String,
    pub record_count: i64,
    pub total_net: f64,
    pub paid_amount: f64,
    pub pending_amount: f64,
}

// 仪表盘总览
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardOverview {
    pub students: StudentOverview,
    pub staff: StaffOverview,
    pub fees: FeeOverview,
    pub payroll: PayrollOverview,
    /// 7 天内到期的已发布作业
    pub upcoming_assignments: Vec<Assignment>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
