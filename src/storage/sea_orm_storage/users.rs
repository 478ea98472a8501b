use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo,
    common::pagination::{clamp_page, normalize_pagination},
    users::{
        entities::{User, UserRole, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::search_condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

/// 账号邮箱统一存小写，与教职工档案按邮箱关联
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn db_error(action: &str) -> impl FnOnce(sea_orm::DbErr) -> SchoolAdminError + '_ {
    move |e| SchoolAdminError::database_operation(format!("{action}失败: {e}"))
}

impl SeaOrmStorage {
    async fn find_user_where(&self, condition: Condition) -> Result<Option<User>> {
        let model = Users::find()
            .filter(condition)
            .one(&self.db)
            .await
            .map_err(db_error("查询账号"))?;
        Ok(model.map(|m| m.into_user()))
    }

    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let display_name = req
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let created = ActiveModel {
            username: Set(req.username.trim().to_string()),
            email: Set(normalize_email(&req.email)),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(display_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("创建账号"))?;

        Ok(created.into_user())
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        self.find_user_where(Condition::all().add(Column::Id.eq(id)))
            .await
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        self.find_user_where(Condition::all().add(Column::Username.eq(username.trim())))
            .await
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        self.find_user_where(Condition::all().add(Column::Email.eq(normalize_email(email))))
            .await
    }

    /// 登录时用户名区分大小写，邮箱不区分
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let condition = Condition::any()
            .add(Column::Username.eq(identifier.trim()))
            .add(Column::Email.eq(normalize_email(identifier)));
        self.find_user_where(condition).await
    }

    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = normalize_pagination(query.page, query.size);

        let mut select = Users::find();
        if let Some(cond) = search_condition(
            query.search.as_deref(),
            &[Column::Username, Column::Email, Column::DisplayName],
        ) {
            select = select.filter(cond);
        }
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_asc(Column::Username)
            .paginate(&self.db, size);
        let counts = paginator
            .num_items_and_pages()
            .await
            .map_err(db_error("统计账号"))?;

        let page = clamp_page(page, counts.number_of_pages);
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("查询账号列表"))?;

        Ok(UserListResponse {
            items: models.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(
                page,
                size,
                counts.number_of_items,
                counts.number_of_pages,
            ),
        })
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::LastLogin,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("记录登录时间"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询账号"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(email) = update.email {
            model.email = Set(normalize_email(&email));
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        // 传空字符串表示清除显示名
        if let Some(display_name) = update.display_name {
            let trimmed = display_name.trim();
            model.display_name = Set((!trimmed.is_empty()).then(|| trimmed.to_string()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model.update(&self.db).await.map_err(db_error("更新账号"))?;
        Ok(Some(updated.into_user()))
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("删除账号"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(db_error("统计账号"))
    }

    /// 处于启用状态的管理员数量
    pub async fn count_active_admins_impl(&self) -> Result<u64> {
        Users::find()
            .filter(Column::Role.eq(UserRole::Admin.to_string()))
            .filter(Column::Status.eq(UserStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("统计管理员"))
    }
}
