use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// `page` 默认 1，`size` 默认 10；越界值在存储层收敛
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// 查询字符串里的数字总以字符串出现（`flatten` 时尤其如此），JSON 里则可能是数字
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    fn into_i64<E: serde::de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            IntOrString::Int(v) => Ok(Some(v)),
            IntOrString::Str(s) if s.trim().is_empty() => Ok(None),
            IntOrString::Str(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid integer: {s}"))),
        }
    }
}

fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    IntOrString::deserialize(deserializer)?
        .into_i64()?
        .ok_or_else(|| serde::de::Error::custom("expected an integer"))
}

/// 可选 i64 参数，空字符串视为未提供
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        Some(raw) => raw.into_i64(),
        None => Ok(None),
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

/// 单页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

/// 规范化分页参数：page >= 1，1 <= size <= MAX_PAGE_SIZE
pub fn normalize_pagination(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1) as u64;
    let size = size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE) as u64;
    (page, size)
}

/// 页码越界时回落到最后一页，空结果集固定为第 1 页
pub fn clamp_page(requested: u64, total_pages: u64) -> u64 {
    requested.min(total_pages).max(1)
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pagination_bounds() {
        assert_eq!(normalize_pagination(None, None), (1, 10));
        assert_eq!(normalize_pagination(Some(0), Some(0)), (1, 1));
        assert_eq!(normalize_pagination(Some(-3), Some(500)), (1, 100));
        assert_eq!(normalize_pagination(Some(4), Some(25)), (4, 25));
    }

    #[test]
    fn test_clamp_page_stays_in_bounds() {
        assert_eq!(clamp_page(1, 0), 1);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
    }

    #[derive(Debug, Deserialize)]
    struct OptionalIdQuery {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        student_id: Option<i64>,
    }

    #[test]
    fn test_optional_i64_inside_flatten() {
        let query =
            actix_web::web::Query::<OptionalIdQuery>::from_query("page=2&size=5&student_id=42")
                .unwrap()
                .into_inner();
        assert_eq!(query.pagination.page, 2);
        assert_eq!(query.student_id, Some(42));

        let query = actix_web::web::Query::<OptionalIdQuery>::from_query("page=1")
            .unwrap()
            .into_inner();
        assert_eq!(query.student_id, None);
    }

    #[test]
    fn test_pagination_query_accepts_strings() {
        let query: PaginationQuery =
            serde_json::from_str(r#"{"page": "3", "size": 20}"#).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.size, 20);

        assert!(serde_json::from_str::<PaginationQuery>(r#"{"page": "abc"}"#).is_err());
    }
}
