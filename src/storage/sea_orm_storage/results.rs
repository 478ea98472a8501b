use super::SeaOrmStorage;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::term_results::{ActiveModel, Column, Entity as TermResults};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo, SortOrder,
    common::{
        Term,
        money::round2,
        pagination::{clamp_page, normalize_pagination},
    },
    results::{
        entities::{TermResult, grade_for},
        requests::{ResultEntry, ResultFilter, ResultListQuery, ResultSortField},
        responses::ResultListResponse,
    },
};
use crate::utils::{contains_pattern, search_term};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SelectTwo, Set, TransactionTrait,
};
use std::collections::HashSet;

fn filtered_select(
    filter: &ResultFilter,
    sort_by: ResultSortField,
    sort_order: SortOrder,
) -> SelectTwo<TermResults, Students> {
    let mut select = TermResults::find().find_also_related(Students);

    if let Some(student_id) = filter.student_id {
        select = select.filter(Column::StudentId.eq(student_id));
    }
    if let Some(ref class_name) = filter.class_name {
        select = select.filter(StudentColumn::ClassName.eq(class_name.trim()));
    }
    if let Some(ref subject) = filter.subject {
        select = select.filter(Column::Subject.eq(subject.trim()));
    }
    if let Some(ref session) = filter.session {
        select = select.filter(Column::Session.eq(session.trim()));
    }
    if let Some(term) = filter.term {
        select = select.filter(Column::Term.eq(term.as_str()));
    }
    if let Some(term) = search_term(filter.search.as_deref()) {
        select = select.filter(
            Condition::any()
                .add(StudentColumn::FirstName.like(contains_pattern(term)))
                .add(StudentColumn::LastName.like(contains_pattern(term)))
                .add(StudentColumn::AdmissionNo.like(contains_pattern(term)))
                .add(Column::Subject.like(contains_pattern(term))),
        );
    }

    let order = sort_order.to_order();
    select = match sort_by {
        ResultSortField::StudentName => select
            .order_by(StudentColumn::LastName, order.clone())
            .order_by(StudentColumn::FirstName, order)
            .order_by_asc(Column::Subject),
        ResultSortField::Subject => select
            .order_by(Column::Subject, order)
            .order_by_asc(StudentColumn::LastName),
        ResultSortField::Total => select.order_by(Column::Total, order),
    };
    select.order_by_asc(Column::Id)
}

impl SeaOrmStorage {
    /// 返回给定 ID 中实际存在的学生
    pub async fn existing_student_ids_impl(&self, ids: &[i64]) -> Result<HashSet<i64>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let found: Vec<i64> = Students::find()
            .select_only()
            .column(StudentColumn::Id)
            .filter(StudentColumn::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(found.into_iter().collect())
    }

    /// 按 (学生, 科目, 学年, 学期) 写入成绩，已存在则覆盖，重复提交结果相同
    pub async fn upsert_term_results_impl(
        &self,
        session: &str,
        term: Term,
        subject: &str,
        entries: &[ResultEntry],
        recorded_by: i64,
    ) -> Result<Vec<TermResult>> {
        let session = session.trim();
        let subject = subject.trim();
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved_ids = Vec::with_capacity(entries.len());
        for entry in entries {
            let ca_score = round2(entry.ca_score);
            let exam_score = round2(entry.exam_score);
            let total = round2(ca_score + exam_score);
            let (grade, remark) = grade_for(total);

            let existing = TermResults::find()
                .filter(Column::StudentId.eq(entry.student_id))
                .filter(Column::Subject.eq(subject))
                .filter(Column::Session.eq(session))
                .filter(Column::Term.eq(term.as_str()))
                .one(&txn)
                .await
                .map_err(|e| SchoolAdminError::database_operation(format!("查询成绩失败: {e}")))?;

            let saved = match existing {
                Some(existing) => {
                    let mut model: ActiveModel = existing.into();
                    model.ca_score = Set(ca_score);
                    model.exam_score = Set(exam_score);
                    model.total = Set(total);
                    model.grade = Set(grade.to_string());
                    model.remark = Set(remark.to_string());
                    model.recorded_by = Set(recorded_by);
                    model.updated_at = Set(now);
                    model.update(&txn).await
                }
                None => {
                    ActiveModel {
                        student_id: Set(entry.student_id),
                        subject: Set(subject.to_string()),
                        session: Set(session.to_string()),
                        term: Set(term.to_string()),
                        ca_score: Set(ca_score),
                        exam_score: Set(exam_score),
                        total: Set(total),
                        grade: Set(grade.to_string()),
                        remark: Set(remark.to_string()),
                        recorded_by: Set(recorded_by),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                }
            }
            .map_err(|e| SchoolAdminError::database_operation(format!("保存成绩失败: {e}")))?;

            saved_ids.push(saved.id);
        }

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        if saved_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = TermResults::find()
            .find_also_related(Students)
            .filter(Column::Id.is_in(saved_ids))
            .order_by_asc(StudentColumn::LastName)
            .order_by_asc(StudentColumn::FirstName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(result, student)| result.into_term_result(student))
            .collect())
    }

    /// 删除成绩
    pub async fn delete_term_result_impl(&self, id: i64) -> Result<bool> {
        let result = TermResults::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出成绩
    pub async fn list_term_results_with_pagination_impl(
        &self,
        query: ResultListQuery,
    ) -> Result<ResultListResponse> {
        let (page, size) = normalize_pagination(query.page, query.size);
        let select = filtered_select(&query.filter, query.sort_by, query.sort_order);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询成绩总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let page = clamp_page(page, pages);
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(ResultListResponse {
            items: rows
                .into_iter()
                .map(|(result, student)| result.into_term_result(student))
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 按筛选条件列出全部成绩（班级汇总与导出使用）
    pub async fn list_term_results_filtered_impl(
        &self,
        filter: &ResultFilter,
        sort_by: ResultSortField,
        sort_order: SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<TermResult>> {
        let rows = filtered_select(filter, sort_by, sort_order)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(result, student)| result.into_term_result(student))
            .collect())
    }
}
