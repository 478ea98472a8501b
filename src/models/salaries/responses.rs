use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Salary, SalaryStatus};
use crate::models::common::{
    AmountBreakdown, PaginationInfo,
    money::round2,
    stats::sum_by,
};

// 工资列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct SalaryListResponse {
    pub items: Vec<Salary>,
    pub pagination: PaginationInfo,
}

// 生成工资单响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct GeneratePayrollResponse {
    pub period: String,
    pub created: i64,
    pub skipped: i64,
}

/// 批量发放中未处理的记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct SkippedSalary {
    pub id: i64,
    pub reason: String,
}

// 批量发放响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct PaySalariesResponse {
    pub updated: Vec<i64>,
    pub skipped: Vec<SkippedSalary>,
}

/// 工资统计（基于当前筛选结果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct SalaryStats {
    pub record_count: i64,
    pub total_gross: f64,
    pub total_net: f64,
    pub total_deductions: f64,
    pub total_tax: f64,
    pub paid_amount: f64,
    pub pending_amount: f64,
    /// 各状态的记录数与实发合计
    pub by_status: Vec<AmountBreakdown>,
    /// 各部门的记录数与实发合计
    pub by_department: Vec<AmountBreakdown>,
}

impl SalaryStats {
    pub fn from_salaries(salaries: &[Salary]) -> Self {
        let sum = |f: fn(&Salary) -> f64| round2(salaries.iter().map(f).sum::<f64>());
        let sum_status = |status: SalaryStatus| {
            round2(
                salaries
                    .iter()
                    .filter(|s| s.status == status)
                    .map(|s| s.net_pay)
                    .sum::<f64>(),
            )
        };

        Self {
            record_count: salaries.len() as i64,
            total_gross: sum(|s| s.gross_pay),
            total_net: sum(|s| s.net_pay),
            total_deductions: sum(|s| s.deductions),
            total_tax: sum(|s| s.tax),
            paid_amount: sum_status(SalaryStatus::Paid),
            pending_amount: sum_status(SalaryStatus::Pending),
            by_status: sum_by(salaries, |s| s.status.as_str(), |s| s.net_pay),
            by_department: sum_by(salaries, |s| s.department.clone(), |s| s.net_pay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::salaries::entities::PayBreakdown;
    use chrono::Utc;

    fn salary(id: i64, department: &str, status: SalaryStatus, basic: f64, tax: f64) -> Salary {
        let pay = PayBreakdown::compute(basic, 100.0, 50.0, tax).unwrap();
        Salary {
            id,
            staff_id: id,
            staff_no: format!("STF{id:03}"),
            staff_name: format!("Staff {id}"),
            department: department.into(),
            period: "2025-03".into(),
            basic_salary: basic,
            allowances: 100.0,
            deductions: 50.0,
            tax,
            gross_pay: pay.gross_pay,
            net_pay: pay.net_pay,
            status,
            paid_on: None,
            payment_method: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_salary_stats_totals() {
        let list = vec![
            salary(1, "Science", SalaryStatus::Paid, 1000.0, 100.0),
            salary(2, "Science", SalaryStatus::Pending, 800.0, 80.0),
            salary(3, "Admin", SalaryStatus::OnHold, 600.0, 0.0),
        ];
        let stats = SalaryStats::from_salaries(&list);

        assert_eq!(stats.record_count, 3);
        assert_eq!(stats.total_gross, 2700.0);
        assert_eq!(stats.total_deductions, 150.0);
        assert_eq!(stats.total_tax, 180.0);
        assert_eq!(stats.total_net, 2370.0);
        assert_eq!(stats.paid_amount, 950.0);
        assert_eq!(stats.pending_amount, 770.0);

        let dept_total: f64 = stats.by_department.iter().map(|d| d.amount).sum();
        assert_eq!(round2(dept_total), stats.total_net);
        assert_eq!(stats.by_status.len(), 3);
    }
}
