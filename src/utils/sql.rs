//! SQL 辅助函数

use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, Condition};

/// 转义 LIKE 通配符（`\`、`%`、`_`），与 `ESCAPE '\'` 配合使用
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// 子串匹配模式 `%input%`
pub fn contains_pattern(input: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(input))).escape('\\')
}

/// 在多列上做子串搜索（任一列命中即可）
///
/// 空白搜索词返回 `None`，调用方不追加条件。
pub fn search_condition<C>(search: Option<&str>, columns: &[C]) -> Option<Condition>
where
    C: ColumnTrait,
{
    let term = search_term(search)?;
    let condition = columns.iter().fold(Condition::any(), |cond, col| {
        cond.add(col.like(contains_pattern(term)))
    });
    Some(condition)
}

/// 规范化搜索词，空白视为未提供
pub fn search_term(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }

    #[test]
    fn test_search_condition_skips_blank() {
        use crate::entity::students::Column;
        assert!(search_condition(Some("   "), &[Column::FirstName]).is_none());
        assert!(search_condition(None, &[Column::FirstName]).is_none());
        assert!(search_condition(Some("ada"), &[Column::FirstName, Column::LastName]).is_some());
    }
}
