use super::SeaOrmStorage;
use crate::entity::fee_payments::{
    ActiveModel as PaymentActiveModel, Column as PaymentColumn, Entity as FeePayments,
};
use crate::entity::fee_records::{ActiveModel, Column, Entity as FeeRecords, Model};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo, SortOrder,
    common::{
        money::{MONEY_EPSILON, round2},
        pagination::{clamp_page, normalize_pagination},
    },
    fees::{
        entities::{FeePayment, FeeRecord, FeeStatus, PaymentOutcome},
        requests::{
            BulkCreateFeesRequest, CreateFeeRequest, FeeFilter, FeeListQuery, FeeSortField,
            RecordPaymentRequest, UpdateFeeRequest,
        },
        responses::{BulkCreateFeesResponse, FeeListResponse},
    },
    students::entities::StudentStatus,
};
use crate::utils::dates::{date_to_ts, today};
use crate::utils::{contains_pattern, search_term};
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SelectTwo, Set, TransactionTrait,
};
use std::collections::HashSet;

/// 状态在读取时推导，筛选时转换为等价的 SQL 条件
fn status_condition(status: FeeStatus, today_ts: i64) -> Condition {
    let not_due_yet = Condition::any()
        .add(Column::DueDate.is_null())
        .add(Column::DueDate.gte(today_ts));

    match status {
        FeeStatus::Paid => Condition::all().add(Column::Balance.lte(MONEY_EPSILON)),
        FeeStatus::Overdue => Condition::all()
            .add(Column::Balance.gt(MONEY_EPSILON))
            .add(Column::DueDate.is_not_null())
            .add(Column::DueDate.lt(today_ts)),
        FeeStatus::Partial => Condition::all()
            .add(Column::Balance.gt(MONEY_EPSILON))
            .add(not_due_yet)
            .add(Column::AmountPaid.gt(0.0)),
        FeeStatus::Unpaid => Condition::all()
            .add(Column::Balance.gt(MONEY_EPSILON))
            .add(not_due_yet)
            .add(Column::AmountPaid.lte(0.0)),
    }
}

fn filtered_select(
    filter: &FeeFilter,
    sort_by: FeeSortField,
    sort_order: SortOrder,
    today: NaiveDate,
) -> SelectTwo<FeeRecords, Students> {
    let mut select = FeeRecords::find().find_also_related(Students);

    if let Some(student_id) = filter.student_id {
        select = select.filter(Column::StudentId.eq(student_id));
    }
    if let Some(ref class_name) = filter.class_name {
        select = select.filter(StudentColumn::ClassName.eq(class_name.trim()));
    }
    if let Some(ref session) = filter.session {
        select = select.filter(Column::Session.eq(session.trim()));
    }
    if let Some(term) = filter.term {
        select = select.filter(Column::Term.eq(term.as_str()));
    }
    if let Some(fee_type) = filter.fee_type {
        select = select.filter(Column::FeeType.eq(fee_type.as_str()));
    }
    if let Some(status) = filter.status {
        select = select.filter(status_condition(status, date_to_ts(today)));
    }
    if let Some(term) = search_term(filter.search.as_deref()) {
        select = select.filter(
            Condition::any()
                .add(StudentColumn::FirstName.like(contains_pattern(term)))
                .add(StudentColumn::LastName.like(contains_pattern(term)))
                .add(StudentColumn::AdmissionNo.like(contains_pattern(term))),
        );
    }

    let order = sort_order.to_order();
    select = match sort_by {
        FeeSortField::DueDate => select.order_by(Column::DueDate, order),
        FeeSortField::AmountDue => select.order_by(Column::AmountDue, order),
        FeeSortField::Balance => select.order_by(Column::Balance, order),
        FeeSortField::CreatedAt => select.order_by(Column::CreatedAt, order),
    };
    select.order_by_asc(Column::Id)
}

fn generate_receipt_no(paid_on: NaiveDate) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "RCT-{}-{}",
        paid_on.format("%Y%m%d"),
        suffix[..10].to_uppercase()
    )
}

impl SeaOrmStorage {
    async fn load_fee<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<Option<FeeRecord>> {
        let result = FeeRecords::find_by_id(id)
            .find_also_related(Students)
            .one(conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询收费记录失败: {e}")))?;

        let today = today();
        Ok(result.map(|(fee, student)| fee.into_fee_record(student, today)))
    }

    async fn begin_txn(&self) -> Result<DatabaseTransaction> {
        self.db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))
    }

    /// 先写后读：UPDATE 先取得行锁（SQLite 为库级写锁），之后读到的余额是最新提交的值，
    /// 并发的另一笔写入会等待本事务结束
    async fn lock_fee_row(txn: &DatabaseTransaction, id: i64) -> Result<Option<Model>> {
        FeeRecords::update_many()
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("锁定收费记录失败: {e}")))?;

        FeeRecords::find_by_id(id)
            .one(txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询收费记录失败: {e}")))
    }

    /// 创建收费项目
    pub async fn create_fee_impl(&self, req: CreateFeeRequest) -> Result<FeeRecord> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            session: Set(req.session.trim().to_string()),
            term: Set(req.term.to_string()),
            fee_type: Set(req.fee_type.to_string()),
            description: Set(req.description),
            amount_due: Set(round2(req.amount_due)),
            discount: Set(round2(req.discount)),
            amount_paid: Set(0.0),
            balance: Set(round2(req.amount_due - req.discount)),
            due_date: Set(req.due_date.map(date_to_ts)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建收费项目失败: {e}")))?;

        self.load_fee(&self.db, inserted.id)
            .await?
            .ok_or_else(|| SchoolAdminError::not_found("收费项目创建后未找到"))
    }

    /// 为班级内所有在读学生创建收费项目，已有同学年同学期同类型项目的学生跳过
    pub async fn bulk_create_fees_impl(
        &self,
        req: BulkCreateFeesRequest,
    ) -> Result<BulkCreateFeesResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let student_ids: Vec<i64> = Students::find()
            .select_only()
            .column(StudentColumn::Id)
            .filter(StudentColumn::ClassName.eq(req.class_name.trim()))
            .filter(StudentColumn::Status.eq(StudentStatus::Active.as_str()))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班级学生失败: {e}")))?;

        let existing: HashSet<i64> = FeeRecords::find()
            .select_only()
            .column(Column::StudentId)
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .filter(Column::Session.eq(req.session.trim()))
            .filter(Column::Term.eq(req.term.as_str()))
            .filter(Column::FeeType.eq(req.fee_type.as_str()))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询已有收费项目失败: {e}")))?
            .into_iter()
            .collect();

        let now = chrono::Utc::now().timestamp();
        let models: Vec<ActiveModel> = student_ids
            .iter()
            .filter(|id| !existing.contains(id))
            .map(|student_id| ActiveModel {
                student_id: Set(*student_id),
                session: Set(req.session.trim().to_string()),
                term: Set(req.term.to_string()),
                fee_type: Set(req.fee_type.to_string()),
                description: Set(req.description.clone()),
                amount_due: Set(round2(req.amount_due)),
                discount: Set(round2(req.discount)),
                amount_paid: Set(0.0),
                balance: Set(round2(req.amount_due - req.discount)),
                due_date: Set(req.due_date.map(date_to_ts)),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .collect();

        let created = models.len() as i64;
        if !models.is_empty() {
            FeeRecords::insert_many(models)
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("批量创建收费项目失败: {e}"))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(BulkCreateFeesResponse {
            created,
            skipped: existing.len() as i64,
        })
    }

    /// 通过 ID 获取收费项目
    pub async fn get_fee_by_id_impl(&self, id: i64) -> Result<Option<FeeRecord>> {
        self.load_fee(&self.db, id).await
    }

    /// 更新收费项目，余额随应缴与减免重新计算
    pub async fn update_fee_impl(
        &self,
        id: i64,
        update: UpdateFeeRequest,
    ) -> Result<Option<FeeRecord>> {
        let txn = self.begin_txn().await?;
        let Some(existing) = Self::lock_fee_row(&txn, id).await? else {
            return Ok(None);
        };

        let amount_due = round2(update.amount_due.unwrap_or(existing.amount_due));
        let discount = round2(update.discount.unwrap_or(existing.discount));
        if discount > amount_due {
            return Err(SchoolAdminError::validation("减免金额不能超过应缴金额"));
        }
        let balance = round2(amount_due - discount - existing.amount_paid);
        if balance < -MONEY_EPSILON {
            return Err(SchoolAdminError::validation(format!(
                "修改后余额为负数: {balance:.2}"
            )));
        }

        let mut model: ActiveModel = existing.into();
        model.amount_due = Set(amount_due);
        model.discount = Set(discount);
        model.balance = Set(balance);
        model.updated_at = Set(chrono::Utc::now().timestamp());
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(date_to_ts(due_date)));
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新收费项目失败: {e}")))?;

        let fee = self.load_fee(&txn, id).await?;
        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;
        Ok(fee)
    }

    /// 删除收费项目；已有缴费流水时返回 Conflict
    pub async fn delete_fee_impl(&self, id: i64) -> Result<bool> {
        let txn = self.begin_txn().await?;
        if Self::lock_fee_row(&txn, id).await?.is_none() {
            return Ok(false);
        }

        let payments = FeePayments::find()
            .filter(PaymentColumn::FeeRecordId.eq(id))
            .count(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询缴费流水失败: {e}")))?;
        if payments > 0 {
            return Err(SchoolAdminError::conflict("该收费项目已有缴费记录，无法删除"));
        }

        let result = FeeRecords::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除收费项目失败: {e}")))?;
        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 登记缴费：校验 0 < amount <= balance，在同一事务内写入流水并更新已缴与余额
    pub async fn record_payment_impl(
        &self,
        fee_id: i64,
        req: RecordPaymentRequest,
        recorded_by: i64,
    ) -> Result<PaymentOutcome> {
        if !req.amount.is_finite() || req.amount <= 0.0 {
            return Err(SchoolAdminError::validation("缴费金额必须大于 0"));
        }
        let amount = round2(req.amount);

        let txn = self.begin_txn().await?;
        let Some(fee) = Self::lock_fee_row(&txn, fee_id).await? else {
            return Ok(PaymentOutcome::FeeNotFound);
        };

        if amount > fee.balance + MONEY_EPSILON {
            return Ok(PaymentOutcome::ExceedsBalance {
                balance: fee.balance,
            });
        }

        let now = chrono::Utc::now().timestamp();
        let paid_on = req.paid_on.unwrap_or_else(today);

        let payment = PaymentActiveModel {
            fee_record_id: Set(fee_id),
            amount: Set(amount),
            method: Set(req.method.to_string()),
            reference: Set(req.reference),
            receipt_no: Set(generate_receipt_no(paid_on)),
            paid_on: Set(date_to_ts(paid_on)),
            recorded_by: Set(recorded_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolAdminError::database_operation(format!("写入缴费流水失败: {e}")))?;

        let amount_paid = round2(fee.amount_paid + amount);
        let balance = round2(fee.balance - amount).max(0.0);
        let mut model: ActiveModel = fee.into();
        model.amount_paid = Set(amount_paid);
        model.balance = Set(balance);
        model.updated_at = Set(now);
        model
            .update(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新收费余额失败: {e}")))?;

        let fee = self
            .load_fee(&txn, fee_id)
            .await?
            .ok_or_else(|| SchoolAdminError::not_found("收费记录不存在"))?;

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(PaymentOutcome::Recorded {
            payment: payment.into_fee_payment(),
            fee,
        })
    }

    /// 列出收费项目的缴费流水
    pub async fn list_fee_payments_impl(&self, fee_id: i64) -> Result<Vec<FeePayment>> {
        let payments = FeePayments::find()
            .filter(PaymentColumn::FeeRecordId.eq(fee_id))
            .order_by_asc(PaymentColumn::PaidOn)
            .order_by_asc(PaymentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询缴费流水失败: {e}")))?;

        Ok(payments.into_iter().map(|m| m.into_fee_payment()).collect())
    }

    /// 分页列出收费项目
    pub async fn list_fees_with_pagination_impl(
        &self,
        query: FeeListQuery,
    ) -> Result<FeeListResponse> {
        let (page, size) = normalize_pagination(query.page, query.size);
        let today = today();
        let select = filtered_select(&query.filter, query.sort_by, query.sort_order, today);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询收费项目总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询收费项目页数失败: {e}"))
        })?;

        let page = clamp_page(page, pages);
        let rows = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询收费项目列表失败: {e}"))
        })?;

        Ok(FeeListResponse {
            items: rows
                .into_iter()
                .map(|(fee, student)| fee.into_fee_record(student, today))
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 按筛选条件列出全部收费项目
    pub async fn list_fees_filtered_impl(
        &self,
        filter: &FeeFilter,
        sort_by: FeeSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<FeeRecord>> {
        let today = today();
        let rows = filtered_select(filter, sort_by, sort_order, today)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolAdminError::database_operation(format!("查询收费项目列表失败: {e}"))
            })?;

        Ok(rows
            .into_iter()
            .map(|(fee, student)| fee.into_fee_record(student, today))
            .collect())
    }
}
