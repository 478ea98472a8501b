//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::fee_payments::{
    ActiveModel as FeePaymentActiveModel, Entity as FeePayments, Model as FeePaymentModel,
};
pub use super::fee_records::{
    ActiveModel as FeeRecordActiveModel, Entity as FeeRecords, Model as FeeRecordModel,
};
pub use super::salaries::{
    ActiveModel as SalaryActiveModel, Entity as Salaries, Model as SalaryModel,
};
pub use super::staff::{ActiveModel as StaffActiveModel, Entity as Staff, Model as StaffModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::term_results::{
    ActiveModel as TermResultActiveModel, Entity as TermResults, Model as TermResultModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
