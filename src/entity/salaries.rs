//! 工资实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "salaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub staff_id: i64,
    pub period: String,
    pub basic_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub tax: f64,
    pub gross_pay: f64,
    pub net_pay: f64,
    pub status: String,
    pub paid_on: Option<i64>,
    pub payment_method: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::Id"
    )]
    Staff,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_salary(
        self,
        staff: Option<super::staff::Model>,
    ) -> crate::models::salaries::entities::Salary {
        use crate::models::fees::entities::PaymentMethod;
        use crate::models::salaries::entities::{Salary, SalaryStatus};
        use crate::utils::dates::{ts_to_date, ts_to_datetime};

        let (staff_no, staff_name, department) = staff
            .map(|s| (s.staff_no.clone(), s.full_name(), s.department))
            .unwrap_or_default();

        Salary {
            id: self.id,
            staff_id: self.staff_id,
            staff_no,
            staff_name,
            department,
            period: self.period,
            basic_salary: self.basic_salary,
            allowances: self.allowances,
            deductions: self.deductions,
            tax: self.tax,
            gross_pay: self.gross_pay,
            net_pay: self.net_pay,
            status: self
                .status
                .parse::<SalaryStatus>()
                .unwrap_or(SalaryStatus::Pending),
            paid_on: self.paid_on.map(ts_to_date),
            payment_method: self
                .payment_method
                .and_then(|m| m.parse::<PaymentMethod>().ok()),
            notes: self.notes,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
