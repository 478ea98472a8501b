use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use super::money::round2;

/// 分组计数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/common.ts")]
pub struct GroupCount {
    pub key: String,
    pub count: i64,
}

/// 分组金额汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/common.ts")]
pub struct AmountBreakdown {
    pub key: String,
    pub count: i64,
    pub amount: f64,
}

/// 按 key 计数，结果按 key 升序
pub fn count_by<T, K, F>(items: &[T], key_fn: F) -> Vec<GroupCount>
where
    F: Fn(&T) -> K,
    K: Into<String>,
{
    let mut groups: BTreeMap<String, i64> = BTreeMap::new();
    for item in items {
        *groups.entry(key_fn(item).into()).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect()
}

/// 按 key 计数并累加金额，结果按 key 升序
pub fn sum_by<T, K, F, A>(items: &[T], key_fn: F, amount_fn: A) -> Vec<AmountBreakdown>
where
    F: Fn(&T) -> K,
    K: Into<String>,
    A: Fn(&T) -> f64,
{
    let mut groups: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    for item in items {
        let entry = groups.entry(key_fn(item).into()).or_default();
        entry.0 += 1;
        entry.1 += amount_fn(item);
    }
    groups
        .into_iter()
        .map(|(key, (count, amount))| AmountBreakdown {
            key,
            count,
            amount: round2(amount),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_by_sorted_keys() {
        let items = ["b", "a", "b", "c", "b"];
        let counts = count_by(&items, |s| s.to_string());
        assert_eq!(
            counts,
            vec![
                GroupCount { key: "a".into(), count: 1 },
                GroupCount { key: "b".into(), count: 3 },
                GroupCount { key: "c".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_sum_by_totals_match_input() {
        let items = [("x", 10.10), ("y", 5.0), ("x", 0.2)];
        let sums = sum_by(&items, |i| i.0, |i| i.1);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums[0].key, "x");
        assert_eq!(sums[0].count, 2);
        assert_eq!(sums[0].amount, 10.3);
        let total: f64 = sums.iter().map(|s| s.amount).sum();
        assert_eq!(round2(total), 15.3);
    }
}
