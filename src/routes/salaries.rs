use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::salaries::requests::{
    CreateSalaryRequest, GeneratePayrollRequest, PaySalariesRequest, SalaryExportParams,
    SalaryListParams, UpdateSalaryRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SalaryService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SalaryService 实例
static SALARY_SERVICE: Lazy<SalaryService> = Lazy::new(SalaryService::new_lazy);

pub async fn list_salaries(
    req: HttpRequest,
    query: web::Query<SalaryListParams>,
) -> ActixResult<HttpResponse> {
    SALARY_SERVICE.list_salaries(query.into_inner(), &req).await
}

pub async fn create_salary(
    req: HttpRequest,
    salary_data: web::Json<CreateSalaryRequest>,
) -> ActixResult<HttpResponse> {
    SALARY_SERVICE
        .create_salary(salary_data.into_inner(), &req)
        .await
}

// 为在职教职工生成当月工资单
pub async fn generate_payroll(
    req: HttpRequest,
    generate_data: web::Json<GeneratePayrollRequest>,
) -> ActixResult<HttpResponse> {
    SALARY_SERVICE
        .generate_payroll(generate_data.into_inner(), &req)
        .await
}

// 批量发放
pub async fn pay_salaries(
    req: HttpRequest,
    pay_data: web::Json<PaySalariesRequest>,
) -> ActixResult<HttpResponse> {
    SALARY_SERVICE.pay_salaries(pay_data.into_inner(), &req).await
}

pub async fn salary_stats(
    req: HttpRequest,
    query: web::Query<SalaryListParams>,
) -> ActixResult<HttpResponse> {
    SALARY_SERVICE.salary_stats(query.into_inner(), &req).await
}

pub async fn export_salaries(
    req: HttpRequest,
    query: web::Query<SalaryExportParams>,
) -> ActixResult<HttpResponse> {
    SALARY_SERVICE
        .export_salaries(query.into_inner(), &req)
        .await
}

pub async fn get_salary(req: HttpRequest, salary_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SALARY_SERVICE.get_salary(salary_id.0, &req).await
}

pub async fn update_salary(
    req: HttpRequest,
    salary_id: SafeIDI64,
    update_data: web::Json<UpdateSalaryRequest>,
) -> ActixResult<HttpResponse> {
    SALARY_SERVICE
        .update_salary(salary_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_salary(req: HttpRequest, salary_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SALARY_SERVICE.delete_salary(salary_id.0, &req).await
}

// 配置路由
pub fn configure_salary_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/salaries")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::finance_roles()))
                    .route("", web::get().to(list_salaries))
                    .route("", web::post().to(create_salary))
                    .route("/generate", web::post().to(generate_payroll))
                    .route("/pay", web::post().to(pay_salaries))
                    .route("/stats", web::get().to(salary_stats))
                    .route(
                        "/export",
                        web::get()
                            .to(export_salaries)
                            .wrap(middlewares::RateLimit::export()),
                    )
                    .route("/{id}", web::get().to(get_salary))
                    .route("/{id}", web::put().to(update_salary))
                    .route("/{id}", web::delete().to(delete_salary)),
            ),
    );
}
