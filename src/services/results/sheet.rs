//! 成绩表保存
//!
//! 按 (学生, 科目, 学年, 学期) 写入，重复提交同一张表结果不变。
//! 每行独立校验，校验失败的行不影响其余行。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use tracing::info;

use super::ResultService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    results::{
        entities::validate_scores,
        requests::{ResultEntry, SaveResultSheetRequest},
        responses::{ResultEntryError, SaveResultSheetResponse},
    },
};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_required, validate_session};

/// 单张成绩表的最大行数
const MAX_ENTRIES: usize = 500;

/// 区分可写入的行与错误行；同一学生重复出现时只保留第一次
pub(crate) fn partition_entries(
    entries: &[ResultEntry],
    known_students: &HashSet<i64>,
) -> (Vec<ResultEntry>, Vec<ResultEntryError>) {
    let mut valid = Vec::new();
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let error = |message: String| ResultEntryError {
            index,
            student_id: entry.student_id,
            message,
        };

        if let Err(msg) = validate_scores(entry.ca_score, entry.exam_score) {
            errors.push(error(msg));
        } else if !known_students.contains(&entry.student_id) {
            errors.push(error("学生不存在".to_string()));
        } else if !seen.insert(entry.student_id) {
            errors.push(error("同一学生在成绩表中重复出现".to_string()));
        } else {
            valid.push(entry.clone());
        }
    }

    (valid, errors)
}

pub async fn save_sheet(
    service: &ResultService,
    sheet: SaveResultSheetRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_session(sheet.session.trim()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ResultInvalid, msg)));
    }
    if let Err(msg) = validate_required(&sheet.subject, 100) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ResultInvalid,
            format!("subject {msg}"),
        )));
    }
    if sheet.entries.len() > MAX_ENTRIES {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ResultInvalid,
            format!("单张成绩表最多 {MAX_ENTRIES} 行"),
        )));
    }

    let recorded_by = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let storage = service.get_storage(request);

    let ids: Vec<i64> = sheet.entries.iter().map(|e| e.student_id).collect();
    let known_students = match storage.existing_student_ids(&ids).await {
        Ok(known) => known,
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::InternalServerError,
                "Failed to check students",
                e,
            ));
        }
    };

    let (valid, errors) = partition_entries(&sheet.entries, &known_students);

    let items = if valid.is_empty() {
        Vec::new()
    } else {
        match storage
            .upsert_term_results(
                sheet.session.trim(),
                sheet.term,
                sheet.subject.trim(),
                &valid,
                recorded_by,
            )
            .await
        {
            Ok(items) => items,
            Err(e) => {
                return Ok(storage_error_response(
                    ErrorCode::ResultInvalid,
                    "Failed to save result sheet",
                    e,
                ));
            }
        }
    };

    info!(
        "Result sheet {} {} {} saved by user {}: {} saved, {} rejected",
        sheet.session,
        sheet.term,
        sheet.subject,
        recorded_by,
        items.len(),
        errors.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SaveResultSheetResponse {
            saved: items.len(),
            errors,
            items,
        },
        "成绩已保存",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(student_id: i64, ca: f64, exam: f64) -> ResultEntry {
        ResultEntry {
            student_id,
            ca_score: ca,
            exam_score: exam,
        }
    }

    #[test]
    fn test_partition_entries_is_per_row() {
        let known: HashSet<i64> = [1, 2, 3].into_iter().collect();
        let entries = vec![
            entry(1, 30.0, 50.0),
            entry(2, 45.0, 50.0), // 平时成绩超限
            entry(9, 10.0, 10.0), // 学生不存在
            entry(3, 20.0, 30.0),
            entry(1, 10.0, 10.0), // 重复
        ];
        let (valid, errors) = partition_entries(&entries, &known);

        assert_eq!(valid.iter().map(|e| e.student_id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(
            errors.iter().map(|e| e.index).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );
        assert_eq!(errors[1].student_id, 9);
        assert_eq!(valid[0].ca_score, 30.0);
    }
}
