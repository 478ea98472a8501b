use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::fees::requests::{
    BulkCreateFeesRequest, CreateFeeRequest, FeeExportParams, FeeListParams, RecordPaymentRequest,
    UpdateFeeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::FeeService;
use crate::utils::SafeIDI64;

// 懒加载的全局 FeeService 实例
static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

pub async fn list_fees(
    req: HttpRequest,
    query: web::Query<FeeListParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_fees(query.into_inner(), &req).await
}

pub async fn create_fee(
    req: HttpRequest,
    fee_data: web::Json<CreateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_fee(fee_data.into_inner(), &req).await
}

// 按班级批量开具收费
pub async fn bulk_create_fees(
    req: HttpRequest,
    bulk_data: web::Json<BulkCreateFeesRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .bulk_create_fees(bulk_data.into_inner(), &req)
        .await
}

pub async fn fee_stats(
    req: HttpRequest,
    query: web::Query<FeeListParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.fee_stats(query.into_inner(), &req).await
}

pub async fn export_fees(
    req: HttpRequest,
    query: web::Query<FeeExportParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.export_fees(query.into_inner(), &req).await
}

pub async fn get_fee(req: HttpRequest, fee_id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_fee(fee_id.0, &req).await
}

pub async fn update_fee(
    req: HttpRequest,
    fee_id: SafeIDI64,
    update_data: web::Json<UpdateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .update_fee(fee_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_fee(req: HttpRequest, fee_id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.delete_fee(fee_id.0, &req).await
}

pub async fn list_payments(req: HttpRequest, fee_id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_payments(fee_id.0, &req).await
}

pub async fn record_payment(
    req: HttpRequest,
    fee_id: SafeIDI64,
    payment: web::Json<RecordPaymentRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .record_payment(fee_id.0, payment.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_fee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/fees")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::finance_roles()))
                    .route("", web::get().to(list_fees))
                    .route("", web::post().to(create_fee))
                    .route("/bulk", web::post().to(bulk_create_fees))
                    .route("/stats", web::get().to(fee_stats))
                    .route(
                        "/export",
                        web::get()
                            .to(export_fees)
                            .wrap(middlewares::RateLimit::export()),
                    )
                    .route("/{id}", web::get().to(get_fee))
                    .route("/{id}", web::put().to(update_fee))
                    .route("/{id}", web::delete().to(delete_fee))
                    .route("/{id}/payments", web::get().to(list_payments))
                    .route("/{id}/payments", web::post().to(record_payment)),
            ),
    );
}
