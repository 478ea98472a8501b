//! 收费记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub session: String,
    pub term: String,
    pub fee_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub amount_due: f64,
    pub discount: f64,
    pub amount_paid: f64,
    pub balance: f64,
    pub due_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::fee_payments::Entity")]
    Payments,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::fee_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，状态按 `today` 推导
    pub fn into_fee_record(
        self,
        student: Option<super::students::Model>,
        today: chrono::NaiveDate,
    ) -> crate::models::fees::entities::FeeRecord {
        use crate::models::common::Term;
        use crate::models::fees::entities::{FeeRecord, FeeStatus, FeeType};
        use crate::utils::dates::{ts_to_date, ts_to_datetime};

        let due_date = self.due_date.map(ts_to_date);
        let status = FeeStatus::derive(self.balance, self.amount_paid, due_date, today);
        let (admission_no, student_name, class_name) = student
            .map(|s| (s.admission_no.clone(), s.full_name(), s.class_name))
            .unwrap_or_default();

        FeeRecord {
            id: self.id,
            student_id: self.student_id,
            admission_no,
            student_name,
            class_name,
            session: self.session,
            term: self.term.parse::<Term>().unwrap_or(Term::First),
            fee_type: self.fee_type.parse::<FeeType>().unwrap_or(FeeType::Other),
            description: self.description,
            amount_due: self.amount_due,
            discount: self.discount,
            amount_paid: self.amount_paid,
            balance: self.balance,
            due_date,
            status,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
