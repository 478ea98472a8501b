//! 存储层、缓存与报表共用的错误类型
//!
//! 服务层通过 `services::storage_error_response` 把错误映射为 HTTP 响应：
//! `Validation` 对应 400，`NotFound` 对应 404，`Conflict` 与唯一约束冲突对应 409。

use std::fmt;

/// 每个变体生成 `code()`、`error_type()`、`message()` 以及同名 snake_case 构造函数
macro_rules! define_school_admin_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolAdminError {
            $($variant(String),)*
        }

        impl SchoolAdminError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolAdminError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolAdminError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolAdminError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolAdminError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolAdminError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_admin_errors! {
    CachePluginNotFound("E001", "Cache Plugin Not Found"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Resource Conflict"),
    Export("E008", "Export Error"),
    Import("E009", "Import Error"),
}

impl SchoolAdminError {
    /// 是否为唯一约束冲突（SQLite / PostgreSQL / MySQL 的报错文本各不相同）
    pub fn is_unique_violation(&self) -> bool {
        if matches!(self, SchoolAdminError::Conflict(_)) {
            return true;
        }
        let msg = self.message().to_lowercase();
        msg.contains("unique constraint")
            || msg.contains("duplicate key")
            || msg.contains("duplicate entry")
    }
}

impl fmt::Display for SchoolAdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for SchoolAdminError {}

impl From<sea_orm::DbErr> for SchoolAdminError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchoolAdminError::DatabaseOperation(err.to_string())
    }
}

// 报表渲染错误
impl From<csv::Error> for SchoolAdminError {
    fn from(err: csv::Error) -> Self {
        SchoolAdminError::Export(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SchoolAdminError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        SchoolAdminError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolAdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_types() {
        assert_eq!(SchoolAdminError::database_config("x").code(), "E002");
        assert_eq!(SchoolAdminError::validation("x").code(), "E005");
        assert_eq!(SchoolAdminError::import("x").code(), "E009");
        assert_eq!(
            SchoolAdminError::not_found("x").error_type(),
            "Resource Not Found"
        );
    }

    #[test]
    fn test_display_includes_type_and_message() {
        let err = SchoolAdminError::validation("amount must be positive");
        assert_eq!(err.message(), "amount must be positive");
        assert_eq!(err.to_string(), "Validation Error: amount must be positive");
    }

    #[test]
    fn test_csv_error_maps_to_export() {
        let io = std::io::Error::other("broken pipe");
        let err: SchoolAdminError = csv::Error::from(io).into();
        assert!(matches!(err, SchoolAdminError::Export(_)));
    }

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = SchoolAdminError::database_operation(
            "UNIQUE constraint failed: students.admission_no",
        );
        assert!(sqlite.is_unique_violation());
        let pg = SchoolAdminError::database_operation(
            "duplicate key value violates unique constraint \"staff_email_key\"",
        );
        assert!(pg.is_unique_violation());
        assert!(SchoolAdminError::conflict("salary already paid").is_unique_violation());
        assert!(!SchoolAdminError::not_found("student").is_unique_violation());
    }
}
