//! 缴费流水实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub fee_record_id: i64,
    pub amount: f64,
    pub method: String,
    pub reference: Option<String>,
    #[sea_orm(unique)]
    pub receipt_no: String,
    pub paid_on: i64,
    pub recorded_by: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fee_records::Entity",
        from = "Column::FeeRecordId",
        to = "super::fee_records::Column::Id"
    )]
    FeeRecord,
}

impl Related<super::fee_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee_payment(self) -> crate::models::fees::entities::FeePayment {
        use crate::models::fees::entities::{FeePayment, PaymentMethod};
        use crate::utils::dates::{ts_to_date, ts_to_datetime};

        FeePayment {
            id: self.id,
            fee_record_id: self.fee_record_id,
            amount: self.amount,
            method: self
                .method
                .parse::<PaymentMethod>()
                .unwrap_or(PaymentMethod::Cash),
            reference: self.reference,
            receipt_no: self.receipt_no,
            paid_on: ts_to_date(self.paid_on),
            recorded_by: self.recorded_by,
            created_at: ts_to_datetime(self.created_at),
        }
    }
}
