//! 教职工实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub staff_no: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    /// JSON 数组
    #[sea_orm(column_type = "Text")]
    pub subjects: String,
    /// JSON 数组
    #[sea_orm(column_type = "Text")]
    pub classes: String,
    pub qualification: Option<String>,
    pub employment_type: String,
    pub base_salary: f64,
    pub status: String,
    pub hired_on: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::salaries::Entity")]
    Salaries,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
}

impl Related<super::salaries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Salaries.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn into_staff(self) -> crate::models::staff::entities::Staff {
        use crate::models::staff::entities::{EmploymentType, Staff, StaffPosition, StaffStatus};
        use crate::utils::dates::{ts_to_date, ts_to_datetime};

        Staff {
            id: self.id,
            staff_no: self.staff_no,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            position: self
                .position
                .parse::<StaffPosition>()
                .unwrap_or(StaffPosition::Support),
            department: self.department,
            subjects: serde_json::from_str(&self.subjects).unwrap_or_default(),
            classes: serde_json::from_str(&self.classes).unwrap_or_default(),
            qualification: self.qualification,
            employment_type: self
                .employment_type
                .parse::<EmploymentType>()
                .unwrap_or(EmploymentType::FullTime),
            base_salary: self.base_salary,
            status: self
                .status
                .parse::<StaffStatus>()
                .unwrap_or(StaffStatus::Active),
            hired_on: ts_to_date(self.hired_on),
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
