use super::SeaOrmStorage;
use crate::entity::staff::{Column as StaffColumn, Entity as StaffEntity};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::common::GroupCount;
use crate::models::staff::entities::StaffStatus;
use crate::models::students::entities::StudentStatus;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 学生人数，可按学籍状态过滤
    pub async fn count_students_impl(&self, status: Option<StudentStatus>) -> Result<u64> {
        let mut select = Students::find();
        if let Some(status) = status {
            select = select.filter(StudentColumn::Status.eq(status.as_str()));
        }
        select
            .count(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("统计学生数量失败: {e}")))
    }

    /// 各班在读学生人数
    pub async fn count_active_students_by_class_impl(&self) -> Result<Vec<GroupCount>> {
        let rows: Vec<(String, i64)> = Students::find()
            .select_only()
            .column(StudentColumn::ClassName)
            .column_as(StudentColumn::Id.count(), "count")
            .filter(StudentColumn::Status.eq(StudentStatus::Active.as_str()))
            .group_by(StudentColumn::ClassName)
            .order_by_asc(StudentColumn::ClassName)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("统计班级人数失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect())
    }

    /// 教职工人数，可按在职状态过滤
    pub async fn count_staff_impl(&self, status: Option<StaffStatus>) -> Result<u64> {
        let mut select = StaffEntity::find();
        if let Some(status) = status {
            select = select.filter(StaffColumn::Status.eq(status.as_str()));
        }
        select
            .count(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("统计教职工数量失败: {e}")))
    }
}
