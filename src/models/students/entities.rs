use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_str_enum! {
    /// 性别
    Gender, "../frontend/src/types/generated/student.ts", {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

crate::define_str_enum! {
    /// 学籍状态
    StudentStatus, "../frontend/src/types/generated/student.ts", {
        Active => "active",
        Graduated => "graduated",
        Suspended => "suspended",
        Withdrawn => "withdrawn",
    }
}

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub class_name: String,
    pub section: Option<String>,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: StudentStatus,
    pub enrolled_on: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
