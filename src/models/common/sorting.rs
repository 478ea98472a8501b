use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/common.ts")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn is_desc(self) -> bool {
        matches!(self, SortOrder::Desc)
    }

    /// 转换为 SeaORM 排序方向
    pub fn to_order(self) -> sea_orm::Order {
        match self {
            SortOrder::Asc => sea_orm::Order::Asc,
            SortOrder::Desc => sea_orm::Order::Desc,
        }
    }
}

/// 为排序字段枚举生成 serde/TS 实现与默认值
///
/// 每个列表只接受白名单内的排序字段，未知字段在反序列化阶段即被拒绝。
#[macro_export]
macro_rules! define_sort_fields {
    ($name:ident, $ts_file:literal, default = $default:ident, { $($variant:ident),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, ts_rs::TS)]
        #[serde(rename_all = "snake_case")]
        #[ts(export, export_to = $ts_file)]
        pub enum $name {
            $($variant,)+
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    define_sort_fields!(DemoSortField, "../frontend/src/types/generated/common.ts", default = CreatedAt, {
        Name,
        CreatedAt,
    });

    #[test]
    fn test_sort_order_parsing() {
        let order: SortOrder = serde_json::from_str("\"desc\"").unwrap();
        assert!(order.is_desc());
        assert!(serde_json::from_str::<SortOrder>("\"sideways\"").is_err());
    }

    #[test]
    fn test_sort_field_whitelist() {
        let field: DemoSortField = serde_json::from_str("\"created_at\"").unwrap();
        assert_eq!(field, DemoSortField::CreatedAt);
        assert_eq!(DemoSortField::default(), DemoSortField::CreatedAt);
        assert!(serde_json::from_str::<DemoSortField>("\"password_hash\"").is_err());
    }
}
