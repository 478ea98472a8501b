use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::results::requests::{
    ClassSummaryParams, ResultExportParams, ResultListParams, SaveResultSheetRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ResultService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ResultService 实例
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn list_results(
    req: HttpRequest,
    query: web::Query<ResultListParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_results(query.into_inner(), &req).await
}

// 保存成绩表，前端自动保存会重复提交
pub async fn save_sheet(
    req: HttpRequest,
    sheet: web::Json<SaveResultSheetRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.save_sheet(sheet.into_inner(), &req).await
}

pub async fn class_summary(
    req: HttpRequest,
    query: web::Query<ClassSummaryParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.class_summary(query.into_inner(), &req).await
}

pub async fn export_results(
    req: HttpRequest,
    query: web::Query<ResultExportParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.export_results(query.into_inner(), &req).await
}

pub async fn delete_result(req: HttpRequest, result_id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.delete_result(result_id.0, &req).await
}

// 配置路由
pub fn configure_result_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/results")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles()))
                    .route("", web::get().to(list_results))
                    .route("/sheet", web::put().to(save_sheet))
                    .route("/summary", web::get().to(class_summary))
                    .route(
                        "/export",
                        web::get()
                            .to(export_results)
                            .wrap(middlewares::RateLimit::export()),
                    )
                    .route("/{id}", web::delete().to(delete_result)),
            ),
    );
}
