use super::SeaOrmStorage;
use crate::entity::salaries::{Column as SalaryColumn, Entity as Salaries};
use crate::entity::staff::{ActiveModel, Column, Entity as StaffEntity};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo, SortOrder,
    common::pagination::{clamp_page, normalize_pagination},
    staff::{
        entities::{Staff, StaffStatus},
        requests::{
            CreateStaffRequest, StaffFilter, StaffListQuery, StaffSortField, UpdateStaffRequest,
        },
        responses::StaffListResponse,
    },
};
use crate::utils::dates::{date_to_ts, today};
use crate::utils::search_condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

fn filtered_select(
    filter: &StaffFilter,
    sort_by: StaffSortField,
    sort_order: SortOrder,
) -> Select<StaffEntity> {
    let mut select = StaffEntity::find();

    if let Some(position) = filter.position {
        select = select.filter(Column::Position.eq(position.as_str()));
    }
    if let Some(ref department) = filter.department {
        select = select.filter(Column::Department.eq(department.trim()));
    }
    if let Some(status) = filter.status {
        select = select.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(employment_type) = filter.employment_type {
        select = select.filter(Column::EmploymentType.eq(employment_type.as_str()));
    }
    if let Some(cond) = search_condition(
        filter.search.as_deref(),
        &[
            Column::FirstName,
            Column::LastName,
            Column::StaffNo,
            Column::Email,
        ],
    ) {
        select = select.filter(cond);
    }

    let order = sort_order.to_order();
    select = match sort_by {
        StaffSortField::Name => select
            .order_by(Column::LastName, order.clone())
            .order_by(Column::FirstName, order),
        StaffSortField::StaffNo => select.order_by(Column::StaffNo, order),
        StaffSortField::HiredOn => select.order_by(Column::HiredOn, order),
        StaffSortField::BaseSalary => select.order_by(Column::BaseSalary, order),
    };
    select.order_by_asc(Column::Id)
}

fn encode_list(values: &[String]) -> String {
    let cleaned: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    serde_json::to_string(&cleaned).unwrap_or_else(|_| "[]".to_string())
}

impl SeaOrmStorage {
    /// 创建教职工
    pub async fn create_staff_impl(&self, req: CreateStaffRequest) -> Result<Staff> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            staff_no: Set(req.staff_no.trim().to_string()),
            first_name: Set(req.first_name.trim().to_string()),
            last_name: Set(req.last_name.trim().to_string()),
            email: Set(req.email.trim().to_lowercase()),
            phone: Set(req.phone.trim().to_string()),
            position: Set(req.position.to_string()),
            department: Set(req.department.trim().to_string()),
            subjects: Set(encode_list(&req.subjects)),
            classes: Set(encode_list(&req.classes)),
            qualification: Set(req.qualification),
            employment_type: Set(req.employment_type.to_string()),
            base_salary: Set(req.base_salary),
            status: Set(req.status.unwrap_or(StaffStatus::Active).to_string()),
            hired_on: Set(date_to_ts(req.hired_on.unwrap_or_else(today))),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建教职工失败: {e}")))?;

        Ok(result.into_staff())
    }

    /// 通过 ID 获取教职工
    pub async fn get_staff_by_id_impl(&self, id: i64) -> Result<Option<Staff>> {
        let result = StaffEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(result.map(|m| m.into_staff()))
    }

    /// 通过邮箱获取教职工（教师账号与教职工档案通过邮箱关联）
    pub async fn get_staff_by_email_impl(&self, email: &str) -> Result<Option<Staff>> {
        let result = StaffEntity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(result.map(|m| m.into_staff()))
    }

    /// 检查工号或邮箱是否已被其他教职工占用
    pub async fn staff_identity_taken_impl(
        &self,
        staff_no: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut any = Condition::any();
        if let Some(staff_no) = staff_no {
            any = any.add(Column::StaffNo.eq(staff_no.trim()));
        }
        if let Some(email) = email {
            any = any.add(Column::Email.eq(email.trim().to_lowercase()));
        }
        if any.is_empty() {
            return Ok(false);
        }

        let mut select = StaffEntity::find().filter(any);
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("检查教职工失败: {e}")))?;

        Ok(count > 0)
    }

    /// 更新教职工
    pub async fn update_staff_impl(
        &self,
        id: i64,
        update: UpdateStaffRequest,
    ) -> Result<Option<Staff>> {
        let existing = StaffEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教职工失败: {e}")))?;
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
        if let Some(email) = update.email {
            model.email = Set(email.trim().to_lowercase());
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone.trim().to_string());
        }
        if let Some(position) = update.position {
            model.position = Set(position.to_string());
        }
        if let Some(department) = update.department {
            model.department = Set(department.trim().to_string());
        }
        if let Some(subjects) = update.subjects {
            model.subjects = Set(encode_list(&subjects));
        }
        if let Some(classes) = update.classes {
            model.classes = Set(encode_list(&classes));
        }
        if let Some(qualification) = update.qualification {
            model.qualification = Set(Some(qualification));
        }
        if let Some(employment_type) = update.employment_type {
            model.employment_type = Set(employment_type.to_string());
        }
        if let Some(base_salary) = update.base_salary {
            model.base_salary = Set(base_salary);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新教职工失败: {e}")))?;

        Ok(Some(updated.into_staff()))
    }

    /// 删除教职工；已有工资记录时返回 Conflict
    pub async fn delete_staff_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let salaries = Salaries::find()
            .filter(SalaryColumn::StaffId.eq(id))
            .count(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询工资记录失败: {e}")))?;
        if salaries > 0 {
            return Err(SchoolAdminError::conflict(
                "该教职工已有工资记录，无法删除，请将状态设为 terminated",
            ));
        }

        let result = StaffEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除教职工失败: {e}")))?;
        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出教职工
    pub async fn list_staff_with_pagination_impl(
        &self,
        query: StaffListQuery,
    ) -> Result<StaffListResponse> {
        let (page, size) = normalize_pagination(query.page, query.size);
        let select = filtered_select(&query.filter, query.sort_by, query.sort_order);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询教职工总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询教职工页数失败: {e}"))
        })?;

        let page = clamp_page(page, pages);
        let staff = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询教职工列表失败: {e}"))
        })?;

        Ok(StaffListResponse {
            items: staff.into_iter().map(|m| m.into_staff()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 按筛选条件列出全部教职工
    pub async fn list_staff_filtered_impl(
        &self,
        filter: &StaffFilter,
        sort_by: StaffSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<Staff>> {
        let staff = filtered_select(filter, sort_by, sort_order)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolAdminError::database_operation(format!("查询教职工列表失败: {e}"))
            })?;

        Ok(staff.into_iter().map(|m| m.into_staff()).collect())
    }
}
