use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use super::entities::{FeePayment, FeeRecord};
use crate::models::common::{
    PaginationInfo,
    money::{percentage, round2},
};

// 收费列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeListResponse {
    pub items: Vec<FeeRecord>,
    pub pagination: PaginationInfo,
}

// 缴费流水列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeePaymentListResponse {
    pub items: Vec<FeePayment>,
}

// 登记缴费响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct RecordPaymentResponse {
    pub payment: FeePayment,
    pub fee: FeeRecord,
}

// 批量创建响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct BulkCreateFeesResponse {
    pub created: i64,
    pub skipped: i64,
}

/// 分组收费汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeBreakdown {
    pub key: String,
    pub count: i64,
    pub amount_due: f64,
    pub amount_paid: f64,
    pub balance: f64,
}

/// 收费统计（基于当前筛选结果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeStats {
    pub record_count: i64,
    pub total_due: f64,
    pub total_discount: f64,
    pub total_paid: f64,
    pub total_outstanding: f64,
    /// 收缴率 = 已缴 / (应缴 - 减免) * 100
    pub collection_rate: f64,
    pub by_status: Vec<FeeBreakdown>,
    pub by_class: Vec<FeeBreakdown>,
    pub by_fee_type: Vec<FeeBreakdown>,
}

fn breakdown<F>(records: &[FeeRecord], key_fn: F) -> Vec<FeeBreakdown>
where
    F: Fn(&FeeRecord) -> String,
{
    let mut groups: BTreeMap<String, FeeBreakdown> = BTreeMap::new();
    for record in records {
        let key = key_fn(record);
        let entry = groups.entry(key.clone()).or_insert_with(|| FeeBreakdown {
            key,
            count: 0,
            amount_due: 0.0,
            amount_paid: 0.0,
            balance: 0.0,
        });
        entry.count += 1;
        entry.amount_due += record.amount_due;
        entry.amount_paid += record.amount_paid;
        entry.balance += record.balance.max(0.0);
    }
    groups
        .into_values()
        .map(|mut b| {
            b.amount_due = round2(b.amount_due);
            b.amount_paid = round2(b.amount_paid);
            b.balance = round2(b.balance);
            b
        })
        .collect()
}

impl FeeStats {
    pub fn from_records(records: &[FeeRecord]) -> Self {
        let total_due: f64 = records.iter().map(|r| r.amount_due).sum();
        let total_discount: f64 = records.iter().map(|r| r.discount).sum();
        let total_paid: f64 = records.iter().map(|r| r.amount_paid).sum();
        let total_outstanding: f64 = records.iter().map(|r| r.balance.max(0.0)).sum();

        Self {
            record_count: records.len() as i64,
            total_due: round2(total_due),
            total_discount: round2(total_discount),
            total_paid: round2(total_paid),
            total_outstanding: round2(total_outstanding),
            collection_rate: percentage(total_paid, total_due - total_discount),
            by_status: breakdown(records, |r| r.status.to_string()),
            by_class: breakdown(records, |r| r.class_name.clone()),
            by_fee_type: breakdown(records, |r| r.fee_type.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Term;
    use crate::models::fees::entities::{FeeStatus, FeeType};
    use chrono::{NaiveDate, Utc};

    fn record(id: i64, class_name: &str, due: f64, discount: f64, paid: f64) -> FeeRecord {
        let balance = round2(due - discount - paid);
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        FeeRecord {
            id,
            student_id: id,
            admission_no: format!("ADM{id:03}"),
            student_name: format!("Student {id}"),
            class_name: class_name.into(),
            session: "2024/2025".into(),
            term: Term::Second,
            fee_type: FeeType::Tuition,
            description: None,
            amount_due: due,
            discount,
            amount_paid: paid,
            balance,
            due_date: None,
            status: FeeStatus::derive(balance, paid, None, today),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fee_stats_sums_match_records() {
        let records = vec![
            record(1, "JSS1", 1000.0, 0.0, 1000.0),
            record(2, "JSS1", 1000.0, 100.0, 450.0),
            record(3, "JSS2", 500.0, 0.0, 0.0),
        ];
        let stats = FeeStats::from_records(&records);

        assert_eq!(stats.record_count, 3);
        assert_eq!(stats.total_due, 2500.0);
        assert_eq!(stats.total_discount, 100.0);
        assert_eq!(stats.total_paid, 1450.0);
        assert_eq!(stats.total_outstanding, 950.0);
        // 1450 / 2400
        assert_eq!(stats.collection_rate, 60.42);

        let by_status_count: i64 = stats.by_status.iter().map(|b| b.count).sum();
        assert_eq!(by_status_count, 3);
        let paid = stats.by_status.iter().find(|b| b.key == "paid").unwrap();
        assert_eq!(paid.count, 1);
        let partial = stats.by_status.iter().find(|b| b.key == "partial").unwrap();
        assert_eq!(partial.balance, 450.0);

        let class_paid: f64 = stats.by_class.iter().map(|b| b.amount_paid).sum();
        assert_eq!(round2(class_paid), stats.total_paid);
    }

    #[test]
    fn test_fee_stats_empty_set() {
        let stats = FeeStats::from_records(&[]);
        assert_eq!(stats.record_count, 0);
        assert_eq!(stats.collection_rate, 0.0);
        assert!(stats.by_status.is_empty());
    }
}
