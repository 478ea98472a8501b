//! 日期与时间戳转换
//!
//! 日期统一以 UTC 零点的 Unix 秒存储。

use chrono::{DateTime, NaiveDate, Utc};

/// 日期转为 UTC 零点时间戳
pub fn date_to_ts(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// 时间戳转为日期
pub fn ts_to_date(ts: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .date_naive()
}

/// 时间戳转为 UTC 时间
pub fn ts_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// 今天（UTC）
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 当前月份 YYYY-MM
pub fn current_period() -> String {
    Utc::now().format("%Y-%m").to_string()
}

/// 解析 `YYYY-MM-DD` 或 `DD/MM/YYYY`（导入文件中常见的两种写法）
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_timestamp_roundtrip_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
        let ts = date_to_ts(date);
        assert_eq!(ts % 86_400, 0);
        assert_eq!(ts_to_date(ts), date);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 9, 2);
        assert_eq!(parse_date("2024-09-02"), expected);
        assert_eq!(parse_date(" 02/09/2024 "), expected);
        assert_eq!(parse_date("2024/09/02"), None);
    }
}
