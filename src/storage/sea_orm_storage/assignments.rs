use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::staff::Entity as StaffEntity;
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::{
            AssignmentListQuery, AssignmentSortField, CreateAssignmentRequest,
            UpdateAssignmentRequest,
        },
        responses::AssignmentListResponse,
    },
    common::pagination::{clamp_page, normalize_pagination},
};
use crate::utils::dates::{date_to_ts, today};
use crate::utils::search_condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    async fn load_assignment(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .find_also_related(StaffEntity)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|(assignment, staff)| assignment.into_assignment(staff)))
    }

    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            subject: Set(req.subject.trim().to_string()),
            class_name: Set(req.class_name.trim().to_string()),
            staff_id: Set(req.staff_id),
            due_date: Set(date_to_ts(req.due_date)),
            max_score: Set(req.max_score),
            status: Set(req.status.unwrap_or(AssignmentStatus::Draft).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建作业失败: {e}")))?;

        self.load_assignment(inserted.id)
            .await?
            .ok_or_else(|| SchoolAdminError::not_found("作业创建后未找到"))
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        self.load_assignment(id).await
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询作业失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(subject) = update.subject {
            model.subject = Set(subject.trim().to_string());
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name.trim().to_string());
        }
        if let Some(staff_id) = update.staff_id {
            model.staff_id = Set(Some(staff_id));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(date_to_ts(due_date));
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新作业失败: {e}")))?;

        self.load_assignment(id).await
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = normalize_pagination(query.page, query.size);
        let filter = &query.filter;

        let mut select = Assignments::find().find_also_related(StaffEntity);

        if let Some(ref class_name) = filter.class_name {
            select = select.filter(Column::ClassName.eq(class_name.trim()));
        }
        if let Some(ref subject) = filter.subject {
            select = select.filter(Column::Subject.eq(subject.trim()));
        }
        if let Some(status) = filter.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(staff_id) = filter.staff_id {
            select = select.filter(Column::StaffId.eq(staff_id));
        }
        if let Some(due_from) = filter.due_from {
            select = select.filter(Column::DueDate.gte(date_to_ts(due_from)));
        }
        if let Some(due_to) = filter.due_to {
            select = select.filter(Column::DueDate.lte(date_to_ts(due_to)));
        }
        if let Some(cond) = search_condition(filter.search.as_deref(), &[Column::Title]) {
            select = select.filter(cond);
        }

        let order = query.sort_order.to_order();
        select = match query.sort_by {
            AssignmentSortField::DueDate => select.order_by(Column::DueDate, order),
            AssignmentSortField::Title => select.order_by(Column::Title, order),
            AssignmentSortField::CreatedAt => select.order_by(Column::CreatedAt, order),
        };
        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询作业总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询作业页数失败: {e}")))?;

        let page = clamp_page(page, pages);
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: rows
                .into_iter()
                .map(|(assignment, staff)| assignment.into_assignment(staff))
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 今天起 `days` 天内到期的已发布作业
    pub async fn list_upcoming_assignments_impl(
        &self,
        days: i64,
        limit: u64,
    ) -> Result<Vec<Assignment>> {
        let start = today();
        let end = start + chrono::Duration::days(days);

        let rows = Assignments::find()
            .find_also_related(StaffEntity)
            .filter(Column::Status.eq(AssignmentStatus::Published.as_str()))
            .filter(Column::DueDate.gte(date_to_ts(start)))
            .filter(Column::DueDate.lte(date_to_ts(end)))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询近期作业失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(assignment, staff)| assignment.into_assignment(staff))
            .collect())
    }
}
