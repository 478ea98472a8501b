use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::staff::requests::{
    CreateStaffRequest, StaffExportParams, StaffListParams, UpdateStaffRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::StaffService;
use crate::utils::SafeIDI64;

// 懒加载的全局 StaffService 实例
static STAFF_SERVICE: Lazy<StaffService> = Lazy::new(StaffService::new_lazy);

pub async fn list_staff(
    req: HttpRequest,
    query: web::Query<StaffListParams>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.list_staff(query.into_inner(), &req).await
}

pub async fn create_staff(
    req: HttpRequest,
    staff_data: web::Json<CreateStaffRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.create_staff(staff_data.into_inner(), &req).await
}

pub async fn staff_stats(
    req: HttpRequest,
    query: web::Query<StaffListParams>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.staff_stats(query.into_inner(), &req).await
}

pub async fn export_staff(
    req: HttpRequest,
    query: web::Query<StaffExportParams>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.export_staff(query.into_inner(), &req).await
}

pub async fn get_staff(req: HttpRequest, staff_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.get_staff(staff_id.0, &req).await
}

pub async fn update_staff(
    req: HttpRequest,
    staff_id: SafeIDI64,
    update_data: web::Json<UpdateStaffRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE
        .update_staff(staff_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_staff(req: HttpRequest, staff_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.delete_staff(staff_id.0, &req).await
}

// 配置路由
pub fn configure_staff_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/staff")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_staff))
                    .route("", web::post().to(create_staff))
                    .route("/stats", web::get().to(staff_stats))
                    .route(
                        "/export",
                        web::get()
                            .to(export_staff)
                            .wrap(middlewares::RateLimit::export()),
                    )
                    .route("/{id}", web::get().to(get_staff))
                    .route("/{id}", web::put().to(update_staff))
                    .route("/{id}", web::delete().to(delete_staff)),
            ),
    );
}
