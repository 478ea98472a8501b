use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_str_enum! {
    /// 职位
    StaffPosition, "../frontend/src/types/generated/staff.ts", {
        Teacher => "teacher",
        Administrator => "administrator",
        Support => "support",
    }
}

crate::define_str_enum! {
    /// 用工类型
    EmploymentType, "../frontend/src/types/generated/staff.ts", {
        FullTime => "full_time",
        PartTime => "part_time",
        Contract => "contract",
    }
}

crate::define_str_enum! {
    /// 在职状态
    StaffStatus, "../frontend/src/types/generated/staff.ts", {
        Active => "active",
        OnLeave => "on_leave",
        Terminated => "terminated",
    }
}

// 教职工实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct Staff {
    pub id: i64,
    pub staff_no: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: StaffPosition,
    pub department: String,
    pub subjects: Vec<String>,
    pub classes: Vec<String>,
    pub qualification: Option<String>,
    pub employment_type: EmploymentType,
    pub base_salary: f64,
    pub status: StaffStatus,
    pub hired_on: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Staff {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
