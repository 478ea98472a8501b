use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::{Term, money::MONEY_EPSILON};

crate::define_str_enum! {
    /// 收费项目类型
    FeeType, "../frontend/src/types/generated/fee.ts", {
        Tuition => "tuition",
        Transport => "transport",
        Uniform => "uniform",
        Exam => "exam",
        Boarding => "boarding",
        Other => "other",
    }
}

crate::define_str_enum! {
    /// 缴费状态（读取时推导，不接受外部输入）
    FeeStatus, "../frontend/src/types/generated/fee.ts", {
        Paid => "paid",
        Partial => "partial",
        Unpaid => "unpaid",
        Overdue => "overdue",
    }
}

crate::define_str_enum! {
    /// 支付方式
    PaymentMethod, "../frontend/src/types/generated/fee.ts", {
        Cash => "cash",
        BankTransfer => "bank_transfer",
        Card => "card",
        Pos => "pos",
        Online => "online",
    }
}

impl FeeStatus {
    /// 根据余额、已缴金额与截止日期推导状态
    pub fn derive(
        balance: f64,
        amount_paid: f64,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        if balance <= MONEY_EPSILON {
            FeeStatus::Paid
        } else if due_date.is_some_and(|d| d < today) {
            FeeStatus::Overdue
        } else if amount_paid > 0.0 {
            FeeStatus::Partial
        } else {
            FeeStatus::Unpaid
        }
    }
}

// 收费记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeRecord {
    pub id: i64,
    pub student_id: i64,
    pub admission_no: String,
    pub student_name: String,
    pub class_name: String,
    pub session: String,
    pub term: Term,
    pub fee_type: FeeType,
    pub description: Option<String>,
    pub amount_due: f64,
    pub discount: f64,
    pub amount_paid: f64,
    pub balance: f64,
    pub due_date: Option<NaiveDate>,
    pub status: FeeStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 缴费流水
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeePayment {
    pub id: i64,
    pub fee_record_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub receipt_no: String,
    pub paid_on: NaiveDate,
    pub recorded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 存储层登记缴费的结果
#[derive(Debug)]
pub enum PaymentOutcome {
    Recorded {
        payment: FeePayment,
        fee: FeeRecord,
    },
    FeeNotFound,
    ExceedsBalance {
        balance: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fee_status_paid_wins_over_overdue() {
        let today = day(2025, 3, 1);
        assert_eq!(
            FeeStatus::derive(0.0, 500.0, Some(day(2025, 1, 1)), today),
            FeeStatus::Paid
        );
        assert_eq!(FeeStatus::derive(0.004, 10.0, None, today), FeeStatus::Paid);
    }

    #[test]
    fn test_fee_status_overdue_partial_unpaid() {
        let today = day(2025, 3, 1);
        assert_eq!(
            FeeStatus::derive(100.0, 0.0, Some(day(2025, 2, 28)), today),
            FeeStatus::Overdue
        );
        // 截止当天不算逾期
        assert_eq!(
            FeeStatus::derive(100.0, 50.0, Some(today), today),
            FeeStatus::Partial
        );
        assert_eq!(FeeStatus::derive(100.0, 0.0, None, today), FeeStatus::Unpaid);
    }

    #[test]
    fn test_fee_enums_parse_from_strings() {
        assert_eq!("bank_transfer".parse::<PaymentMethod>(), Ok(PaymentMethod::BankTransfer));
        assert_eq!(" Tuition ".parse::<FeeType>(), Ok(FeeType::Tuition));
        assert!("cheque".parse::<PaymentMethod>().is_err());
        assert_eq!(FeeStatus::Overdue.to_string(), "overdue");
    }
}
