use super::SeaOrmStorage;
use crate::entity::salaries::{ActiveModel, Column, Entity as Salaries, Model};
use crate::entity::staff::{Column as StaffColumn, Entity as StaffEntity};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo, SortOrder,
    common::pagination::{clamp_page, normalize_pagination},
    fees::entities::PaymentMethod,
    salaries::{
        entities::{PayBreakdown, Salary, SalaryStatus},
        requests::{
            CreateSalaryRequest, SalaryFilter, SalaryListQuery, SalarySortField,
            UpdateSalaryRequest,
        },
        responses::{GeneratePayrollResponse, PaySalariesResponse, SalaryListResponse, SkippedSalary},
    },
    staff::entities::StaffStatus,
};
use crate::utils::dates::{date_to_ts, today};
use crate::utils::{contains_pattern, search_term};
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SelectTwo, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

fn filtered_select(
    filter: &SalaryFilter,
    sort_by: SalarySortField,
    sort_order: SortOrder,
) -> SelectTwo<Salaries, StaffEntity> {
    let mut select = Salaries::find().find_also_related(StaffEntity);

    if let Some(ref period) = filter.period {
        select = select.filter(Column::Period.eq(period.trim()));
    }
    if let Some(status) = filter.status {
        select = select.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(staff_id) = filter.staff_id {
        select = select.filter(Column::StaffId.eq(staff_id));
    }
    if let Some(ref department) = filter.department {
        select = select.filter(StaffColumn::Department.eq(department.trim()));
    }
    if let Some(term) = search_term(filter.search.as_deref()) {
        select = select.filter(
            Condition::any()
                .add(StaffColumn::FirstName.like(contains_pattern(term)))
                .add(StaffColumn::LastName.like(contains_pattern(term)))
                .add(StaffColumn::StaffNo.like(contains_pattern(term))),
        );
    }

    let order = sort_order.to_order();
    select = match sort_by {
        SalarySortField::Period => select
            .order_by(Column::Period, order)
            .order_by_asc(StaffColumn::LastName),
        SalarySortField::NetPay => select.order_by(Column::NetPay, order),
        SalarySortField::StaffName => select
            .order_by(StaffColumn::LastName, order.clone())
            .order_by(StaffColumn::FirstName, order),
    };
    select.order_by_asc(Column::Id)
}

/// 已发放的工资只允许修改备注
fn touches_locked_fields(update: &UpdateSalaryRequest) -> bool {
    update.allowances.is_some()
        || update.deductions.is_some()
        || update.tax.is_some()
        || update.status.is_some_and(|s| s != SalaryStatus::Paid)
}

impl SeaOrmStorage {
    async fn load_salary<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<Option<Salary>> {
        let result = Salaries::find_by_id(id)
            .find_also_related(StaffEntity)
            .one(conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询工资记录失败: {e}")))?;

        Ok(result.map(|(salary, staff)| salary.into_salary(staff)))
    }

    /// 创建单条工资记录，`basic_salary` 须已确定
    pub async fn create_salary_impl(&self, req: CreateSalaryRequest) -> Result<Salary> {
        let basic_salary = req
            .basic_salary
            .ok_or_else(|| SchoolAdminError::validation("缺少基本工资"))?;
        let pay = PayBreakdown::compute(basic_salary, req.allowances, req.deductions, req.tax)
            .map_err(SchoolAdminError::validation)?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            staff_id: Set(req.staff_id),
            period: Set(req.period.trim().to_string()),
            basic_salary: Set(basic_salary),
            allowances: Set(req.allowances),
            deductions: Set(req.deductions),
            tax: Set(req.tax),
            gross_pay: Set(pay.gross_pay),
            net_pay: Set(pay.net_pay),
            status: Set(SalaryStatus::Pending.to_string()),
            paid_on: Set(None),
            payment_method: Set(None),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建工资记录失败: {e}")))?;

        self.load_salary(&self.db, inserted.id)
            .await?
            .ok_or_else(|| SchoolAdminError::not_found("工资记录创建后未找到"))
    }

    /// 指定员工该月份是否已有工资记录
    pub async fn salary_exists_impl(&self, staff_id: i64, period: &str) -> Result<bool> {
        let count = Salaries::find()
            .filter(Column::StaffId.eq(staff_id))
            .filter(Column::Period.eq(period.trim()))
            .count(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询工资记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 生成月度工资单：为每位在职且当月无记录的员工创建待发放记录
    pub async fn generate_payroll_impl(&self, period: &str) -> Result<GeneratePayrollResponse> {
        let period = period.trim();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let active_staff: Vec<(i64, f64)> = StaffEntity::find()
            .select_only()
            .column(StaffColumn::Id)
            .column(StaffColumn::BaseSalary)
            .filter(StaffColumn::Status.eq(StaffStatus::Active.as_str()))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询在职员工失败: {e}")))?;

        let existing: HashSet<i64> = Salaries::find()
            .select_only()
            .column(Column::StaffId)
            .filter(Column::Period.eq(period))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询已有工资记录失败: {e}")))?
            .into_iter()
            .collect();

        let now = chrono::Utc::now().timestamp();
        let mut skipped = 0;
        let mut models = Vec::new();
        for (staff_id, base_salary) in active_staff {
            if existing.contains(&staff_id) {
                skipped += 1;
                continue;
            }
            let pay = PayBreakdown::compute(base_salary, 0.0, 0.0, 0.0)
                .map_err(SchoolAdminError::validation)?;
            models.push(ActiveModel {
                staff_id: Set(staff_id),
                period: Set(period.to_string()),
                basic_salary: Set(base_salary),
                allowances: Set(0.0),
                deductions: Set(0.0),
                tax: Set(0.0),
                gross_pay: Set(pay.gross_pay),
                net_pay: Set(pay.net_pay),
                status: Set(SalaryStatus::Pending.to_string()),
                paid_on: Set(None),
                payment_method: Set(None),
                notes: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            });
        }

        let created = models.len() as i64;
        if !models.is_empty() {
            Salaries::insert_many(models)
                .exec(&txn)
                .await
                .map_err(|e| SchoolAdminError::database_operation(format!("生成工资单失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(GeneratePayrollResponse {
            period: period.to_string(),
            created,
            skipped,
        })
    }

    /// 通过 ID 获取工资记录
    pub async fn get_salary_by_id_impl(&self, id: i64) -> Result<Option<Salary>> {
        self.load_salary(&self.db, id).await
    }

    /// 先 UPDATE 取得行锁再读取，状态判断基于最新提交的数据
    async fn lock_salary_rows(txn: &DatabaseTransaction, ids: &[i64]) -> Result<Vec<Model>> {
        Salaries::update_many()
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("锁定工资记录失败: {e}")))?;

        Salaries::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询工资记录失败: {e}")))
    }

    /// 更新工资记录并重新计算应发与实发；发放只能走批量发放接口
    pub async fn update_salary_impl(
        &self,
        id: i64,
        update: UpdateSalaryRequest,
    ) -> Result<Option<Salary>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;
        let Some(existing) = Self::lock_salary_rows(&txn, &[id]).await?.pop() else {
            return Ok(None);
        };

        let is_paid = existing.status == SalaryStatus::Paid.as_str();
        if is_paid && touches_locked_fields(&update) {
            return Err(SchoolAdminError::conflict("已发放的工资记录只能修改备注"));
        }
        if !is_paid && update.status == Some(SalaryStatus::Paid) {
            return Err(SchoolAdminError::validation(
                "请通过 /salaries/pay 发放工资并指定支付方式",
            ));
        }

        let allowances = update.allowances.unwrap_or(existing.allowances);
        let deductions = update.deductions.unwrap_or(existing.deductions);
        let tax = update.tax.unwrap_or(existing.tax);
        let pay = PayBreakdown::compute(existing.basic_salary, allowances, deductions, tax)
            .map_err(SchoolAdminError::validation)?;

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());
        if let Some(notes) = update.notes {
            model.notes = Set(Some(notes));
        }
        if !is_paid {
            model.allowances = Set(allowances);
            model.deductions = Set(deductions);
            model.tax = Set(tax);
            model.gross_pay = Set(pay.gross_pay);
            model.net_pay = Set(pay.net_pay);
            if let Some(status) = update.status {
                model.status = Set(status.to_string());
            }
        }

        model
            .update(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新工资记录失败: {e}")))?;

        let salary = self.load_salary(&txn, id).await?;
        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;
        Ok(salary)
    }

    /// 批量发放：仅待发放记录会被标记为已发放，其余记录报告跳过原因
    pub async fn pay_salaries_impl(
        &self,
        ids: &[i64],
        method: PaymentMethod,
        paid_on: Option<NaiveDate>,
    ) -> Result<PaySalariesResponse> {
        let mut seen = HashSet::new();
        let ids: Vec<i64> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        let paid_on = date_to_ts(paid_on.unwrap_or_else(today));

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let records: HashMap<i64, Model> = Self::lock_salary_rows(&txn, &ids)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let now = chrono::Utc::now().timestamp();
        let mut updated = Vec::new();
        let mut skipped = Vec::new();
        for id in ids {
            let Some(record) = records.get(&id) else {
                skipped.push(SkippedSalary {
                    id,
                    reason: "工资记录不存在".to_string(),
                });
                continue;
            };
            if record.status != SalaryStatus::Pending.as_str() {
                skipped.push(SkippedSalary {
                    id,
                    reason: format!("当前状态为 {}，仅待发放记录可发放", record.status),
                });
                continue;
            }

            let mut model: ActiveModel = record.clone().into();
            model.status = Set(SalaryStatus::Paid.to_string());
            model.paid_on = Set(Some(paid_on));
            model.payment_method = Set(Some(method.to_string()));
            model.updated_at = Set(now);
            model
                .update(&txn)
                .await
                .map_err(|e| SchoolAdminError::database_operation(format!("发放工资失败: {e}")))?;
            updated.push(id);
        }

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(PaySalariesResponse { updated, skipped })
    }

    /// 删除工资记录
    pub async fn delete_salary_impl(&self, id: i64) -> Result<bool> {
        let result = Salaries::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除工资记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出工资记录
    pub async fn list_salaries_with_pagination_impl(
        &self,
        query: SalaryListQuery,
    ) -> Result<SalaryListResponse> {
        let (page, size) = normalize_pagination(query.page, query.size);
        let select = filtered_select(&query.filter, query.sort_by, query.sort_order);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询工资记录总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询工资记录页数失败: {e}"))
        })?;

        let page = clamp_page(page, pages);
        let rows = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询工资记录列表失败: {e}"))
        })?;

        Ok(SalaryListResponse {
            items: rows
                .into_iter()
                .map(|(salary, staff)| salary.into_salary(staff))
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 按筛选条件列出全部工资记录
    pub async fn list_salaries_filtered_impl(
        &self,
        filter: &SalaryFilter,
        sort_by: SalarySortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<Salary>> {
        let rows = filtered_select(filter, sort_by, sort_order)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolAdminError::database_operation(format!("查询工资记录列表失败: {e}"))
            })?;

        Ok(rows
            .into_iter()
            .map(|(salary, staff)| salary.into_salary(staff))
            .collect())
    }
}
