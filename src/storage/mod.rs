use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    SortOrder,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    common::{GroupCount, Term},
    fees::{
        entities::{FeePayment, FeeRecord, PaymentMethod, PaymentOutcome},
        requests::{
            BulkCreateFeesRequest, CreateFeeRequest, FeeFilter, FeeListQuery, FeeSortField,
            RecordPaymentRequest, UpdateFeeRequest,
        },
        responses::{BulkCreateFeesResponse, FeeListResponse},
    },
    results::{
        entities::TermResult,
        requests::{ResultEntry, ResultFilter, ResultListQuery, ResultSortField},
        responses::ResultListResponse,
    },
    salaries::{
        entities::Salary,
        requests::{CreateSalaryRequest, SalaryFilter, SalaryListQuery, SalarySortField, UpdateSalaryRequest},
        responses::{GeneratePayrollResponse, PaySalariesResponse, SalaryListResponse},
    },
    staff::{
        entities::{Staff, StaffStatus},
        requests::{CreateStaffRequest, StaffFilter, StaffListQuery, StaffSortField, UpdateStaffRequest},
        responses::StaffListResponse,
    },
    students::{
        entities::{Student, StudentStatus},
        requests::{
            CreateStudentRequest, StudentFilter, StudentListQuery, StudentSortField,
            UpdateStudentRequest,
        },
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 列表类 `*_filtered` 方法的 `limit` 为 `None` 时返回全部匹配记录
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 统计启用中的管理员数量
    async fn count_active_admins(&self) -> Result<u64>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_admission_no(&self, admission_no: &str) -> Result<Option<Student>>;
    // 返回已存在的学号
    async fn check_admission_nos_exist(&self, admission_nos: &[String]) -> Result<Vec<String>>;
    // 返回实际存在的学生 ID
    async fn existing_student_ids(&self, ids: &[i64]) -> Result<HashSet<i64>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生（级联删除收费与成绩）
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn list_students_filtered(
        &self,
        filter: &StudentFilter,
        sort_by: StudentSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<Student>>;

    /// 教职工管理方法
    async fn create_staff(&self, staff: CreateStaffRequest) -> Result<Staff>;
    async fn get_staff_by_id(&self, id: i64) -> Result<Option<Staff>>;
    async fn get_staff_by_email(&self, email: &str) -> Result<Option<Staff>>;
    // 工号或邮箱是否已被占用
    async fn staff_identity_taken(
        &self,
        staff_no: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<bool>;
    async fn update_staff(&self, id: i64, update: UpdateStaffRequest) -> Result<Option<Staff>>;
    // 已有工资记录时返回 Conflict
    async fn delete_staff(&self, id: i64) -> Result<bool>;
    async fn list_staff_with_pagination(&self, query: StaffListQuery)
    -> Result<StaffListResponse>;
    async fn list_staff_filtered(
        &self,
        filter: &StaffFilter,
        sort_by: StaffSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<Staff>>;

    /// 收费管理方法
    async fn create_fee(&self, fee: CreateFeeRequest) -> Result<FeeRecord>;
    async fn bulk_create_fees(&self, req: BulkCreateFeesRequest)
    -> Result<BulkCreateFeesResponse>;
    async fn get_fee_by_id(&self, id: i64) -> Result<Option<FeeRecord>>;
    async fn update_fee(&self, id: i64, update: UpdateFeeRequest) -> Result<Option<FeeRecord>>;
    // 已有缴费流水时返回 Conflict
    async fn delete_fee(&self, id: i64) -> Result<bool>;
    // 登记缴费（单事务）
    async fn record_payment(
        &self,
        fee_id: i64,
        req: RecordPaymentRequest,
        recorded_by: i64,
    ) -> Result<PaymentOutcome>;
    async fn list_fee_payments(&self, fee_id: i64) -> Result<Vec<FeePayment>>;
    async fn list_fees_with_pagination(&self, query: FeeListQuery) -> Result<FeeListResponse>;
    async fn list_fees_filtered(
        &self,
        filter: &FeeFilter,
        sort_by: FeeSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<FeeRecord>>;

    /// 工资管理方法
    async fn create_salary(&self, salary: CreateSalaryRequest) -> Result<Salary>;
    async fn salary_exists(&self, staff_id: i64, period: &str) -> Result<bool>;
    async fn generate_payroll(&self, period: &str) -> Result<GeneratePayrollResponse>;
    async fn get_salary_by_id(&self, id: i64) -> Result<Option<Salary>>;
    async fn update_salary(&self, id: i64, update: UpdateSalaryRequest)
    -> Result<Option<Salary>>;
    async fn pay_salaries(
        &self,
        ids: &[i64],
        method: PaymentMethod,
        paid_on: Option<NaiveDate>,
    ) -> Result<PaySalariesResponse>;
    async fn delete_salary(&self, id: i64) -> Result<bool>;
    async fn list_salaries_with_pagination(
        &self,
        query: SalaryListQuery,
    ) -> Result<SalaryListResponse>;
    async fn list_salaries_filtered(
        &self,
        filter: &SalaryFilter,
        sort_by: SalarySortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<Salary>>;

    /// 成绩管理方法
    // 按 (学生, 科目, 学年, 学期) 幂等写入
    async fn upsert_term_results(
        &self,
        session: &str,
        term: Term,
        subject: &str,
        entries: &[ResultEntry],
        recorded_by: i64,
    ) -> Result<Vec<TermResult>>;
    async fn delete_term_result(&self, id: i64) -> Result<bool>;
    async fn list_term_results_with_pagination(
        &self,
        query: ResultListQuery,
    ) -> Result<ResultListResponse>;
    async fn list_term_results_filtered(
        &self,
        filter: &ResultFilter,
        sort_by: ResultSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<TermResult>>;

    /// 作业管理方法
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 今天起 days 天内到期的已发布作业
    async fn list_upcoming_assignments(&self, days: i64, limit: u64) -> Result<Vec<Assignment>>;

    /// 仪表盘统计
    async fn count_students(&self, status: Option<StudentStatus>) -> Result<u64>;
    async fn count_active_students_by_class(&self) -> Result<Vec<GroupCount>>;
    async fn count_staff(&self, status: Option<StaffStatus>) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
