//! 查询参数与 JSON 请求体解析失败时的统一响应

use actix_web::{
    Error, HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 查询参数解析错误（未知排序字段、非法枚举值等）
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("查询参数解析失败 {}: {}", req.path(), err);
    bad_request(format!("查询参数错误: {err}"))
}

/// JSON 请求体解析错误
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("请求体解析失败 {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "请求头 Content-Type 必须为 application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "请求体过大".to_string()
        }
        _ => format!("请求体格式错误: {err}"),
    };
    bad_request(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_query_error_is_bad_request() {
        let req = TestRequest::default().uri("/api/v1/students?sort_by=x").to_http_request();
        let err = actix_web::web::Query::<crate::models::students::requests::StudentListParams>::from_query(
            "sort_by=password_hash",
        )
        .unwrap_err();
        let resp = query_error_handler(err, &req).error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
