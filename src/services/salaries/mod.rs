pub mod create;
pub mod delete;
pub mod export;
pub mod generate;
pub mod get;
pub mod list;
pub mod pay;
pub mod stats;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::salaries::requests::{
    CreateSalaryRequest, GeneratePayrollRequest, PaySalariesRequest, SalaryExportParams,
    SalaryListParams, UpdateSalaryRequest,
};
use crate::storage::Storage;

pub struct SalaryService {
    storage: Option<Arc<dyn Storage>>,
}

impl SalaryService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_salaries(
        &self,
        query: SalaryListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_salaries(self, query, request).await
    }

    pub async fn create_salary(
        &self,
        salary_data: CreateSalaryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_salary(self, salary_data, request).await
    }

    // 生成月度工资单
    pub async fn generate_payroll(
        &self,
        generate_data: GeneratePayrollRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_payroll(self, generate_data, request).await
    }

    // 批量发放
    pub async fn pay_salaries(
        &self,
        pay_data: PaySalariesRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        pay::pay_salaries(self, pay_data, request).await
    }

    pub async fn get_salary(
        &self,
        salary_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_salary(self, salary_id, request).await
    }

    pub async fn update_salary(
        &self,
        salary_id: i64,
        update_data: UpdateSalaryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_salary(self, salary_id, update_data, request).await
    }

    pub async fn delete_salary(
        &self,
        salary_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_salary(self, salary_id, request).await
    }

    pub async fn salary_stats(
        &self,
        query: SalaryListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stats::salary_stats(self, query, request).await
    }

    pub async fn export_salaries(
        &self,
        query: SalaryExportParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_salaries(self, query, request).await
    }
}
