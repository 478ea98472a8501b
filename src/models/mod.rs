//! 数据模型定义
//!
//! 每个业务模块分为 `entities`（业务实体）、`requests`（请求参数）、`responses`（响应结构）。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod fees;
pub mod results;
pub mod salaries;
pub mod staff;
pub mod students;
pub mod users;

pub use common::{
    ApiResponse, ExportFormat, ExportParams, PaginationInfo, PaginationQuery, SortOrder,
};

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone, Serialize)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用；2xxx 认证与账号；3xxx 学生；4xxx 教职工；
/// 5xxx 收费；6xxx 工资；7xxx 成绩；8xxx 作业；9xxx 导入导出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    RateLimitExceeded = 1029,

    // 认证与账号
    AuthFailed = 2000,
    UserNotFound = 2002,
    UserAlreadyExists = 2003,
    UserNameInvalid = 2004,
    UserEmailInvalid = 2005,
    UserPasswordInvalid = 2006,
    UserEmailAlreadyExists = 2007,
    UserCreationFailed = 2008,
    UserUpdateFailed = 2009,
    UserDeleteFailed = 2010,
    CannotDeleteSelf = 2011,
    LastAdminRequired = 2012,

    // 学生
    StudentNotFound = 3000,
    StudentAlreadyExists = 3001,
    StudentInvalid = 3002,
    StudentCreationFailed = 3003,
    StudentUpdateFailed = 3004,
    StudentDeleteFailed = 3005,

    // 教职工
    StaffNotFound = 4000,
    StaffAlreadyExists = 4001,
    StaffInvalid = 4002,
    StaffHasSalaryRecords = 4003,

    // 收费
    FeeNotFound = 5000,
    FeeInvalid = 5001,
    PaymentExceedsBalance = 5002,
    PaymentInvalid = 5003,
    FeeHasPayments = 5004,

    // 工资
    SalaryNotFound = 6000,
    SalaryInvalid = 6001,
    SalaryAlreadyExists = 6002,
    SalaryAlreadyPaid = 6003,

    // 成绩
    ResultNotFound = 7000,
    ResultInvalid = 7001,

    // 作业
    AssignmentNotFound = 8000,
    AssignmentInvalid = 8001,
    AssignmentPermissionDenied = 8002,

    // 导入导出
    ImportFileMissingColumn = 9000,
    ImportFileParseFailed = 9001,
    ImportFileDataInvalid = 9002,
    ImportFileUploadFailed = 9003,
    ExportFailed = 9010,
}
