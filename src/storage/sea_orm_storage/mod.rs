//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod dashboard;
mod fees;
mod results;
mod salaries;
mod staff;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{SchoolAdminError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 基于已建立的连接创建存储实例（不运行迁移）
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolAdminError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolAdminError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolAdminError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolAdminError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
        requests::{
            CreateSalaryRequest, SalaryFilter, SalaryListQuery, SalarySortField,
            UpdateSalaryRequest,
        },
        responses::{GeneratePayrollResponse, PaySalariesResponse, SalaryListResponse},
    },
    staff::{
        entities::{Staff, StaffStatus},
        requests::{
            CreateStaffRequest, StaffFilter, StaffListQuery, StaffSortField, UpdateStaffRequest,
        },
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
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn count_active_admins(&self) -> Result<u64> {
        self.count_active_admins_impl().await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_admission_no(&self, admission_no: &str) -> Result<Option<Student>> {
        self.get_student_by_admission_no_impl(admission_no).await
    }

    async fn check_admission_nos_exist(&self, admission_nos: &[String]) -> Result<Vec<String>> {
        self.check_admission_nos_exist_impl(admission_nos).await
    }

    async fn existing_student_ids(&self, ids: &[i64]) -> Result<HashSet<i64>> {
        self.existing_student_ids_impl(ids).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_filtered(
        &self,
        filter: &StudentFilter,
        sort_by: StudentSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<Student>> {
        self.list_students_filtered_impl(filter, sort_by, sort_order, limit)
            .await
    }

    // 教职工模块
    async fn create_staff(&self, staff: CreateStaffRequest) -> Result<Staff> {
        self.create_staff_impl(staff).await
    }

    async fn get_staff_by_id(&self, id: i64) -> Result<Option<Staff>> {
        self.get_staff_by_id_impl(id).await
    }

    async fn get_staff_by_email(&self, email: &str) -> Result<Option<Staff>> {
        self.get_staff_by_email_impl(email).await
    }

    async fn staff_identity_taken(
        &self,
        staff_no: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        self.staff_identity_taken_impl(staff_no, email, exclude_id)
            .await
    }

    async fn update_staff(&self, id: i64, update: UpdateStaffRequest) -> Result<Option<Staff>> {
        self.update_staff_impl(id, update).await
    }

    async fn delete_staff(&self, id: i64) -> Result<bool> {
        self.delete_staff_impl(id).await
    }

    async fn list_staff_with_pagination(
        &self,
        query: StaffListQuery,
    ) -> Result<StaffListResponse> {
        self.list_staff_with_pagination_impl(query).await
    }

    async fn list_staff_filtered(
        &self,
        filter: &StaffFilter,
        sort_by: StaffSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<Staff>> {
        self.list_staff_filtered_impl(filter, sort_by, sort_order, limit)
            .await
    }

    // 收费模块
    async fn create_fee(&self, fee: CreateFeeRequest) -> Result<FeeRecord> {
        self.create_fee_impl(fee).await
    }

    async fn bulk_create_fees(
        &self,
        req: BulkCreateFeesRequest,
    ) -> Result<BulkCreateFeesResponse> {
        self.bulk_create_fees_impl(req).await
    }

    async fn get_fee_by_id(&self, id: i64) -> Result<Option<FeeRecord>> {
        self.get_fee_by_id_impl(id).await
    }

    async fn update_fee(&self, id: i64, update: UpdateFeeRequest) -> Result<Option<FeeRecord>> {
        self.update_fee_impl(id, update).await
    }

    async fn delete_fee(&self, id: i64) -> Result<bool> {
        self.delete_fee_impl(id).await
    }

    async fn record_payment(
        &self,
        fee_id: i64,
        req: RecordPaymentRequest,
        recorded_by: i64,
    ) -> Result<PaymentOutcome> {
        self.record_payment_impl(fee_id, req, recorded_by).await
    }

    async fn list_fee_payments(&self, fee_id: i64) -> Result<Vec<FeePayment>> {
        self.list_fee_payments_impl(fee_id).await
    }

    async fn list_fees_with_pagination(&self, query: FeeListQuery) -> Result<FeeListResponse> {
        self.list_fees_with_pagination_impl(query).await
    }

    async fn list_fees_filtered(
        &self,
        filter: &FeeFilter,
        sort_by: FeeSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<FeeRecord>> {
        self.list_fees_filtered_impl(filter, sort_by, sort_order, limit)
            .await
    }

    // 工资模块
    async fn create_salary(&self, salary: CreateSalaryRequest) -> Result<Salary> {
        self.create_salary_impl(salary).await
    }

    async fn salary_exists(&self, staff_id: i64, period: &str) -> Result<bool> {
        self.salary_exists_impl(staff_id, period).await
    }

    async fn generate_payroll(&self, period: &str) -> Result<GeneratePayrollResponse> {
        self.generate_payroll_impl(period).await
    }

    async fn get_salary_by_id(&self, id: i64) -> Result<Option<Salary>> {
        self.get_salary_by_id_impl(id).await
    }

    async fn update_salary(
        &self,
        id: i64,
        update: UpdateSalaryRequest,
    ) -> Result<Option<Salary>> {
        self.update_salary_impl(id, update).await
    }

    async fn pay_salaries(
        &self,
        ids: &[i64],
        method: PaymentMethod,
        paid_on: Option<NaiveDate>,
    ) -> Result<PaySalariesResponse> {
        self.pay_salaries_impl(ids, method, paid_on).await
    }

    async fn delete_salary(&self, id: i64) -> Result<bool> {
        self.delete_salary_impl(id).await
    }

    async fn list_salaries_with_pagination(
        &self,
        query: SalaryListQuery,
    ) -> Result<SalaryListResponse> {
        self.list_salaries_with_pagination_impl(query).await
    }

    async fn list_salaries_filtered(
        &self,
        filter: &SalaryFilter,
        sort_by: SalarySortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<Salary>> {
        self.list_salaries_filtered_impl(filter, sort_by, sort_order, limit)
            .await
    }

    // 成绩模块
    async fn upsert_term_results(
        &self,
        session: &str,
        term: Term,
        subject: &str,
        entries: &[ResultEntry],
        recorded_by: i64,
    ) -> Result<Vec<TermResult>> {
        self.upsert_term_results_impl(session, term, subject, entries, recorded_by)
            .await
    }

    async fn delete_term_result(&self, id: i64) -> Result<bool> {
        self.delete_term_result_impl(id).await
    }

    async fn list_term_results_with_pagination(
        &self,
        query: ResultListQuery,
    ) -> Result<ResultListResponse> {
        self.list_term_results_with_pagination_impl(query).await
    }

    async fn list_term_results_filtered(
        &self,
        filter: &ResultFilter,
        sort_by: ResultSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<TermResult>> {
        self.list_term_results_filtered_impl(filter, sort_by, sort_order, limit)
            .await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn list_upcoming_assignments(&self, days: i64, limit: u64) -> Result<Vec<Assignment>> {
        self.list_upcoming_assignments_impl(days, limit).await
    }

    // 仪表盘
    async fn count_students(&self, status: Option<StudentStatus>) -> Result<u64> {
        self.count_students_impl(status).await
    }

    async fn count_active_students_by_class(&self) -> Result<Vec<GroupCount>> {
        self.count_active_students_by_class_impl().await
    }

    async fn count_staff(&self, status: Option<StaffStatus>) -> Result<u64> {
        self.count_staff_impl(status).await
    }
}
