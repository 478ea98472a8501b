use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::Term;

/// 平时成绩上限
pub const MAX_CA_SCORE: f64 = 40.0;
/// 考试成绩上限
pub const MAX_EXAM_SCORE: f64 = 60.0;
/// 及格线
pub const PASS_MARK: f64 = 40.0;

/// 等级区间：(下限, 等级, 评语)，按下限降序
const GRADE_BANDS: [(f64, &str, &str); 6] = [
    (70.0, "A", "Excellent"),
    (60.0, "B", "Very Good"),
    (50.0, "C", "Good"),
    (45.0, "D", "Fair"),
    (40.0, "E", "Pass"),
    (0.0, "F", "Fail"),
];

/// 全部等级（用于等级分布）
pub const GRADES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// 根据总分给出等级和评语
pub fn grade_for(total: f64) -> (&'static str, &'static str) {
    GRADE_BANDS
        .iter()
        .find(|(min, _, _)| total >= *min)
        .map(|(_, grade, remark)| (*grade, *remark))
        .unwrap_or(("F", "Fail"))
}

/// 校验单科成绩范围
pub fn validate_scores(ca_score: f64, exam_score: f64) -> Result<(), String> {
    if !ca_score.is_finite() || !(0.0..=MAX_CA_SCORE).contains(&ca_score) {
        return Err(format!("平时成绩必须在 0 到 {MAX_CA_SCORE} 之间"));
    }
    if !exam_score.is_finite() || !(0.0..=MAX_EXAM_SCORE).contains(&exam_score) {
        return Err(format!("考试成绩必须在 0 到 {MAX_EXAM_SCORE} 之间"));
    }
    Ok(())
}

/// 竞赛式排名（1,2,2,4）：分数越高名次越靠前，并列者名次相同
pub fn competition_rank(scores: &[f64]) -> Vec<u32> {
    scores
        .iter()
        .map(|score| 1 + scores.iter().filter(|other| *other > score).count() as u32)
        .collect()
}

// 学期成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct TermResult {
    pub id: i64,
    pub student_id: i64,
    pub admission_no: String,
    pub student_name: String,
    pub class_name: String,
    pub subject: String,
    pub session: String,
    pub term: Term,
    pub ca_score: f64,
    pub exam_score: f64,
    pub total: f64,
    pub grade: String,
    pub remark: String,
    pub recorded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_band_edges() {
        assert_eq!(grade_for(100.0), ("A", "Excellent"));
        assert_eq!(grade_for(70.0), ("A", "Excellent"));
        assert_eq!(grade_for(69.5), ("B", "Very Good"));
        assert_eq!(grade_for(60.0), ("B", "Very Good"));
        assert_eq!(grade_for(50.0), ("C", "Good"));
        assert_eq!(grade_for(45.0), ("D", "Fair"));
        assert_eq!(grade_for(44.9), ("E", "Pass"));
        assert_eq!(grade_for(40.0), ("E", "Pass"));
        assert_eq!(grade_for(39.9), ("F", "Fail"));
        assert_eq!(grade_for(0.0), ("F", "Fail"));
    }

    #[test]
    fn test_validate_scores() {
        assert!(validate_scores(40.0, 60.0).is_ok());
        assert!(validate_scores(0.0, 0.0).is_ok());
        assert!(validate_scores(40.5, 10.0).is_err());
        assert!(validate_scores(10.0, 61.0).is_err());
        assert!(validate_scores(-1.0, 10.0).is_err());
        assert!(validate_scores(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_competition_rank_ties() {
        assert_eq!(competition_rank(&[90.0, 80.0, 80.0, 70.0]), vec![1, 2, 2, 4]);
        assert_eq!(competition_rank(&[50.0, 75.0, 50.0]), vec![2, 1, 2]);
        assert!(competition_rank(&[]).is_empty());
    }
}
