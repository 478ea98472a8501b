//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: Option<i64>,
    pub class_name: String,
    pub section: Option<String>,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub email: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub status: String,
    pub enrolled_on: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fee_records::Entity")]
    FeeRecords,
    #[sea_orm(has_many = "super::term_results::Entity")]
    TermResults,
}

impl Related<super::fee_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeRecords.def()
    }
}

impl Related<super::term_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TermResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Gender, Student, StudentStatus};
        use crate::utils::dates::{ts_to_date, ts_to_datetime};

        Student {
            id: self.id,
            admission_no: self.admission_no,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Other),
            date_of_birth: self.date_of_birth.map(ts_to_date),
            class_name: self.class_name,
            section: self.section,
            guardian_name: self.guardian_name,
            guardian_phone: self.guardian_phone,
            email: self.email,
            address: self.address,
            status: self
                .status
                .parse::<StudentStatus>()
                .unwrap_or(StudentStatus::Active),
            enrolled_on: ts_to_date(self.enrolled_on),
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
