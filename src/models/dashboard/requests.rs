use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::Term;

// 仪表盘查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardQuery {
    /// 收费统计的学年，缺省为全部
    pub session: Option<String>,
    /// 收费统计的学期，缺省为全部
    pub term: Option<Term>,
    /// 工资统计月份 YYYY-MM，缺省为当月
    pub period: Option<String>,
}

impl DashboardQuery {
    /// 缓存键，参数组合不同则缓存独立
    pub fn cache_key(&self, period: &str) -> String {
        format!(
            "dashboard:overview:{}:{}:{}",
            self.session.as_deref().unwrap_or("*"),
            self.term.map(|t| t.as_str()).unwrap_or("*"),
            period
        )
    }
}
