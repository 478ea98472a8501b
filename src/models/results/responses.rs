use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

use super::entities::{GRADES, PASS_MARK, TermResult, competition_rank};
use crate::models::common::{GroupCount, PaginationInfo, Term, money::round2};

// 成绩列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListResponse {
    pub items: Vec<TermResult>,
    pub pagination: PaginationInfo,
}

/// 成绩表中未保存的行
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultEntryError {
    pub index: usize,
    pub student_id: i64,
    pub message: String,
}

// 保存成绩表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SaveResultSheetResponse {
    pub saved: usize,
    pub errors: Vec<ResultEntryError>,
    pub items: Vec<TermResult>,
}

/// 学生学期汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct StudentSummary {
    pub student_id: i64,
    pub admission_no: String,
    pub student_name: String,
    pub subjects_taken: i64,
    pub total_score: f64,
    pub average: f64,
    pub position: u32,
}

/// 科目汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SubjectSummary {
    pub subject: String,
    pub entries: i64,
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    pub pass_rate: f64,
    pub grade_distribution: Vec<GroupCount>,
}

/// 班级学期成绩汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ClassSummary {
    pub class_name: String,
    pub session: String,
    pub term: Term,
    pub student_count: i64,
    pub class_average: f64,
    pub students: Vec<StudentSummary>,
    pub subjects: Vec<SubjectSummary>,
}

impl ClassSummary {
    /// 由同一班级、学年、学期的成绩构建汇总，学生按名次排列
    pub fn build(class_name: &str, session: &str, term: Term, results: &[TermResult]) -> Self {
        let mut per_student: BTreeMap<i64, StudentSummary> = BTreeMap::new();
        let mut per_subject: BTreeMap<&str, Vec<&TermResult>> = BTreeMap::new();

        for result in results {
            let entry = per_student
                .entry(result.student_id)
                .or_insert_with(|| StudentSummary {
                    student_id: result.student_id,
                    admission_no: result.admission_no.clone(),
                    student_name: result.student_name.clone(),
                    subjects_taken: 0,
                    total_score: 0.0,
                    average: 0.0,
                    position: 0,
                });
            entry.subjects_taken += 1;
            entry.total_score += result.total;

            per_subject.entry(result.subject.as_str()).or_default().push(result);
        }

        let mut students: Vec<StudentSummary> = per_student
            .into_values()
            .map(|mut s| {
                s.total_score = round2(s.total_score);
                s.average = round2(s.total_score / s.subjects_taken as f64);
                s
            })
            .collect();

        let averages: Vec<f64> = students.iter().map(|s| s.average).collect();
        for (student, position) in students.iter_mut().zip(competition_rank(&averages)) {
            student.position = position;
        }
        students.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.student_name.cmp(&b.student_name))
        });

        let subjects = per_subject
            .into_iter()
            .map(|(subject, entries)| {
                let totals: Vec<f64> = entries.iter().map(|r| r.total).collect();
                let count = totals.len() as f64;
                let passed = totals.iter().filter(|t| **t >= PASS_MARK).count() as f64;
                let grade_distribution = GRADES
                    .iter()
                    .map(|grade| GroupCount {
                        key: grade.to_string(),
                        count: entries.iter().filter(|r| r.grade == *grade).count() as i64,
                    })
                    .collect();

                SubjectSummary {
                    subject: subject.to_string(),
                    entries: entries.len() as i64,
                    average: round2(totals.iter().sum::<f64>() / count),
                    highest: totals.iter().cloned().fold(f64::MIN, f64::max),
                    lowest: totals.iter().cloned().fold(f64::MAX, f64::min),
                    pass_rate: round2(passed / count * 100.0),
                    grade_distribution,
                }
            })
            .collect();

        let class_average = if students.is_empty() {
            0.0
        } else {
            round2(students.iter().map(|s| s.average).sum::<f64>() / students.len() as f64)
        };

        Self {
            class_name: class_name.to_string(),
            session: session.to_string(),
            term,
            student_count: students.len() as i64,
            class_average,
            students,
            subjects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::results::entities::grade_for;
    use chrono::Utc;

    fn result(student_id: i64, name: &str, subject: &str, ca: f64, exam: f64) -> TermResult {
        let total = ca + exam;
        let (grade, remark) = grade_for(total);
        TermResult {
            id: 0,
            student_id,
            admission_no: format!("ADM{student_id:03}"),
            student_name: name.into(),
            class_name: "JSS1".into(),
            subject: subject.into(),
            session: "2024/2025".into(),
            term: Term::First,
            ca_score: ca,
            exam_score: exam,
            total,
            grade: grade.into(),
            remark: remark.into(),
            recorded_by: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_class_summary_positions_and_subjects() {
        let results = vec![
            result(1, "Ada", "Maths", 30.0, 50.0),    // 80
            result(1, "Ada", "English", 20.0, 40.0),  // 60
            result(2, "Bola", "Maths", 35.0, 45.0),   // 80
            result(2, "Bola", "English", 25.0, 35.0), // 60
            result(3, "Chidi", "Maths", 10.0, 20.0),  // 30
            result(3, "Chidi", "English", 30.0, 50.0), // 80
            result(4, "Dayo", "Maths", 40.0, 60.0),   // 100
        ];
        let summary = ClassSummary::build("JSS1", "2024/2025", Term::First, &results);

        assert_eq!(summary.student_count, 4);
        let positions: Vec<(i64, u32)> = summary
            .students
            .iter()
            .map(|s| (s.student_id, s.position))
            .collect();
        // Dayo 100, Ada 70, Bola 70, Chidi 55
        assert_eq!(positions, vec![(4, 1), (1, 2), (2, 2), (3, 4)]);

        let maths = summary.subjects.iter().find(|s| s.subject == "Maths").unwrap();
        assert_eq!(maths.entries, 4);
        assert_eq!(maths.highest, 100.0);
        assert_eq!(maths.lowest, 30.0);
        assert_eq!(maths.average, 72.5);
        assert_eq!(maths.pass_rate, 75.0);
        let graded: i64 = maths.grade_distribution.iter().map(|g| g.count).sum();
        assert_eq!(graded, 4);

        assert_eq!(summary.class_average, 73.75);
    }

    #[test]
    fn test_class_summary_empty() {
        let summary = ClassSummary::build("SS3", "2024/2025", Term::Third, &[]);
        assert_eq!(summary.student_count, 0);
        assert_eq!(summary.class_average, 0.0);
        assert!(summary.subjects.is_empty());
    }
}
