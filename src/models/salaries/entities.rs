use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::money::round2;
use crate::models::fees::entities::PaymentMethod;

crate::define_str_enum! {
    /// 工资发放状态
    SalaryStatus, "../frontend/src/types/generated/salary.ts", {
        Pending => "pending",
        Paid => "paid",
        OnHold => "on_hold",
    }
}

// 工资记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/salary.ts")]
pub struct Salary {
    pub id: i64,
    pub staff_id: i64,
    pub staff_no: String,
    pub staff_name: String,
    pub department: String,
    /// 工资月份 YYYY-MM
    pub period: String,
    pub basic_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub tax: f64,
    pub gross_pay: f64,
    pub net_pay: f64,
    pub status: SalaryStatus,
    pub paid_on: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 应发/实发计算结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayBreakdown {
    pub gross_pay: f64,
    pub net_pay: f64,
}

impl PayBreakdown {
    /// gross = basic + allowances；net = gross - deductions - tax，且各项与 net 均不得为负
    pub fn compute(
        basic_salary: f64,
        allowances: f64,
        deductions: f64,
        tax: f64,
    ) -> Result<Self, String> {
        for (name, value) in [
            ("basic_salary", basic_salary),
            ("allowances", allowances),
            ("deductions", deductions),
            ("tax", tax),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} 不能为负数"));
            }
        }

        let gross_pay = round2(basic_salary + allowances);
        let net_pay = round2(gross_pay - deductions - tax);
        if net_pay < 0.0 {
            return Err(format!(
                "实发工资不能为负数: 应发 {gross_pay:.2}，扣款 {deductions:.2}，税 {tax:.2}"
            ));
        }

        Ok(Self { gross_pay, net_pay })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_breakdown_arithmetic() {
        let pay = PayBreakdown::compute(1500.0, 250.5, 100.0, 120.25).unwrap();
        assert_eq!(pay.gross_pay, 1750.5);
        assert_eq!(pay.net_pay, 1530.25);
    }

    #[test]
    fn test_pay_breakdown_rejects_negative_net() {
        assert!(PayBreakdown::compute(100.0, 0.0, 80.0, 30.0).is_err());
        assert!(PayBreakdown::compute(100.0, -1.0, 0.0, 0.0).is_err());
        // 恰好为 0 是允许的
        let pay = PayBreakdown::compute(100.0, 0.0, 60.0, 40.0).unwrap();
        assert_eq!(pay.net_pay, 0.0);
    }

    #[test]
    fn test_salary_status_parse() {
        assert_eq!("on_hold".parse::<SalaryStatus>(), Ok(SalaryStatus::OnHold));
        assert_eq!(SalaryStatus::Paid.as_str(), "paid");
    }
}
