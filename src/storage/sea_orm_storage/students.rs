use super::SeaOrmStorage;
use crate::entity::fee_payments::{Column as PaymentColumn, Entity as FeePayments};
use crate::entity::fee_records::{Column as FeeColumn, Entity as FeeRecords};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::term_results::{Column as ResultColumn, Entity as TermResults};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo, SortOrder,
    common::pagination::{clamp_page, normalize_pagination},
    students::{
        entities::{Student, StudentStatus},
        requests::{
            CreateStudentRequest, StudentFilter, StudentListQuery, StudentSortField,
            UpdateStudentRequest,
        },
        responses::StudentListResponse,
    },
};
use crate::utils::dates::{date_to_ts, today};
use crate::utils::search_condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};

/// 按筛选条件与排序构造查询（列表、统计、导出共用）
fn filtered_select(
    filter: &StudentFilter,
    sort_by: StudentSortField,
    sort_order: SortOrder,
) -> Select<Students> {
    let mut select = Students::find();

    if let Some(ref class_name) = filter.class_name {
        select = select.filter(Column::ClassName.eq(class_name.trim()));
    }
    if let Some(status) = filter.status {
        select = select.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(gender) = filter.gender {
        select = select.filter(Column::Gender.eq(gender.as_str()));
    }
    if let Some(cond) = search_condition(
        filter.search.as_deref(),
        &[
            Column::FirstName,
            Column::LastName,
            Column::AdmissionNo,
            Column::GuardianName,
        ],
    ) {
        select = select.filter(cond);
    }

    let order = sort_order.to_order();
    select = match sort_by {
        StudentSortField::Name => select
            .order_by(Column::LastName, order.clone())
            .order_by(Column::FirstName, order),
        StudentSortField::AdmissionNo => select.order_by(Column::AdmissionNo, order),
        StudentSortField::ClassName => select
            .order_by(Column::ClassName, order)
            .order_by_asc(Column::LastName),
        StudentSortField::EnrolledOn => select.order_by(Column::EnrolledOn, order),
        StudentSortField::CreatedAt => select.order_by(Column::CreatedAt, order),
    };
    // 排序值相同时按 ID 固定顺序，保证翻页稳定
    select.order_by_asc(Column::Id)
}

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            admission_no: Set(req.admission_no.trim().to_string()),
            first_name: Set(req.first_name.trim().to_string()),
            last_name: Set(req.last_name.trim().to_string()),
            gender: Set(req.gender.to_string()),
            date_of_birth: Set(req.date_of_birth.map(date_to_ts)),
            class_name: Set(req.class_name.trim().to_string()),
            section: Set(req.section),
            guardian_name: Set(req.guardian_name.trim().to_string()),
            guardian_phone: Set(req.guardian_phone.trim().to_string()),
            email: Set(req.email),
            address: Set(req.address),
            status: Set(req.status.unwrap_or(StudentStatus::Active).to_string()),
            enrolled_on: Set(date_to_ts(req.enrolled_on.unwrap_or_else(today))),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过学号获取学生
    pub async fn get_student_by_admission_no_impl(
        &self,
        admission_no: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::AdmissionNo.eq(admission_no.trim()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 批量检查学号是否已存在，返回已存在的学号
    pub async fn check_admission_nos_exist_impl(
        &self,
        admission_nos: &[String],
    ) -> Result<Vec<String>> {
        if admission_nos.is_empty() {
            return Ok(Vec::new());
        }

        let existing: Vec<String> = Students::find()
            .select_only()
            .column(Column::AdmissionNo)
            .filter(Column::AdmissionNo.is_in(admission_nos.iter().cloned()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("检查学号失败: {e}")))?;

        Ok(existing)
    }

    /// 更新学生
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let existing = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name.trim().to_string());
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name.trim().to_string());
        }
        if let Some(gender) = update.gender {
            model.gender = Set(gender.to_string());
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(Some(date_to_ts(date_of_birth)));
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name.trim().to_string());
        }
        if let Some(section) = update.section {
            model.section = Set(Some(section));
        }
        if let Some(guardian_name) = update.guardian_name {
            model.guardian_name = Set(guardian_name.trim().to_string());
        }
        if let Some(guardian_phone) = update.guardian_phone {
            model.guardian_phone = Set(guardian_phone.trim().to_string());
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(updated.into_student()))
    }

    /// 删除学生，同时删除其收费记录、缴费流水与成绩
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let fee_ids: Vec<i64> = FeeRecords::find()
            .select_only()
            .column(FeeColumn::Id)
            .filter(FeeColumn::StudentId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询收费记录失败: {e}")))?;

        if !fee_ids.is_empty() {
            FeePayments::delete_many()
                .filter(PaymentColumn::FeeRecordId.is_in(fee_ids))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("删除缴费流水失败: {e}"))
                })?;
        }

        FeeRecords::delete_many()
            .filter(FeeColumn::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除收费记录失败: {e}")))?;

        TermResults::delete_many()
            .filter(ResultColumn::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除成绩失败: {e}")))?;

        let result = Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除学生失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = normalize_pagination(query.page, query.size);
        let select = filtered_select(&query.filter, query.sort_by, query.sort_order);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生页数失败: {e}")))?;

        let page = clamp_page(page, pages);
        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 按筛选条件列出全部学生（统计与导出使用）
    pub async fn list_students_filtered_impl(
        &self,
        filter: &StudentFilter,
        sort_by: StudentSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<Student>> {
        let students = filtered_select(filter, sort_by, sort_order)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }
}
