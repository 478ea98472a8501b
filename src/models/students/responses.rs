use serde::Serialize;
use ts_rs::TS;

use super::entities::Student;
use crate::models::common::{GroupCount, PaginationInfo, stats::count_by};

// 学生响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentResponse {
    pub student: Student,
}

// 学生列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}

/// 学生统计（基于当前筛选结果）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentStatsResponse {
    pub total: i64,
    pub by_status: Vec<GroupCount>,
    pub by_class: Vec<GroupCount>,
    pub by_gender: Vec<GroupCount>,
}

impl StudentStatsResponse {
    pub fn from_students(students: &[Student]) -> Self {
        Self {
            total: students.len() as i64,
            by_status: count_by(students, |s| s.status.as_str()),
            by_class: count_by(students, |s| s.class_name.clone()),
            by_gender: count_by(students, |s| s.gender.as_str()),
        }
    }
}

/// 导入行错误
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ImportRowError {
    pub row: usize,
    pub field: String,
    pub message: String,
}

/// 导入结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentImportResponse {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}
