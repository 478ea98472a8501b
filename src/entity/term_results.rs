//! 学期成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "term_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject: String,
    pub session: String,
    pub term: String,
    pub ca_score: f64,
    pub exam_score: f64,
    pub total: f64,
    pub grade: String,
    pub remark: String,
    pub recorded_by: i64,
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
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_term_result(
        self,
        student: Option<super::students::Model>,
    ) -> crate::models::results::entities::TermResult {
        use crate::models::common::Term;
        use crate::models::results::entities::TermResult;
        use crate::utils::dates::ts_to_datetime;

        let (admission_no, student_name, class_name) = student
            .map(|s| (s.admission_no.clone(), s.full_name(), s.class_name))
            .unwrap_or_default();

        TermResult {
            id: self.id,
            student_id: self.student_id,
            admission_no,
            student_name,
            class_name,
            subject: self.subject,
            session: self.session,
            term: self.term.parse::<Term>().unwrap_or(Term::First),
            ca_score: self.ca_score,
            exam_score: self.exam_score,
            total: self.total,
            grade: self.grade,
            remark: self.remark,
            recorded_by: self.recorded_by,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
