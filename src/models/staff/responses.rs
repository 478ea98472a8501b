use serde::Serialize;
use ts_rs::TS;

use super::entities::{Staff, StaffStatus};
use crate::models::common::{
    GroupCount, PaginationInfo,
    money::round2,
    stats::count_by,
};

// 教职工列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffListResponse {
    pub items: Vec<Staff>,
    pub pagination: PaginationInfo,
}

/// 教职工统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffStatsResponse {
    pub total: i64,
    pub by_status: Vec<GroupCount>,
    pub by_position: Vec<GroupCount>,
    pub by_department: Vec<GroupCount>,
    /// 在职人员月基本工资合计
    pub active_monthly_base_salary: f64,
}

impl StaffStatsResponse {
    pub fn from_staff(staff: &[Staff]) -> Self {
        let active_monthly_base_salary = staff
            .iter()
            .filter(|s| s.status == StaffStatus::Active)
            .map(|s| s.base_salary)
            .sum::<f64>();

        Self {
            total: staff.len() as i64,
            by_status: count_by(staff, |s| s.status.as_str()),
            by_position: count_by(staff, |s| s.position.as_str()),
            by_department: count_by(staff, |s| s.department.clone()),
            active_monthly_base_salary: round2(active_monthly_base_salary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::staff::entities::{EmploymentType, StaffPosition};
    use chrono::{NaiveDate, Utc};

    fn staff(id: i64, department: &str, status: StaffStatus, salary: f64) -> Staff {
        Staff {
            id,
            staff_no: format!("STF{id:03}"),
            first_name: "Ada".into(),
            last_name: format!("Okafor{id}"),
            email: format!("ada{id}@school.test"),
            phone: "08030000000".into(),
            position: StaffPosition::Teacher,
            department: department.into(),
            subjects: vec!["Mathematics".into()],
            classes: vec![],
            qualification: None,
            employment_type: EmploymentType::FullTime,
            base_salary: salary,
            status,
            hired_on: NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_staff_stats_only_counts_active_salary() {
        let list = vec![
            staff(1, "Science", StaffStatus::Active, 1000.0),
            staff(2, "Science", StaffStatus::OnLeave, 800.0),
            staff(3, "Arts", StaffStatus::Active, 950.5),
            staff(4, "Arts", StaffStatus::Terminated, 700.0),
        ];
        let stats = StaffStatsResponse::from_staff(&list);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active_monthly_base_salary, 1950.5);
        assert_eq!(stats.by_department.len(), 2);
        assert_eq!(stats.by_department[0].key, "Arts");
        assert_eq!(stats.by_department[0].count, 2);
        assert_eq!(
            stats.by_status.iter().map(|g| g.count).sum::<i64>(),
            list.len() as i64
        );
    }
}
