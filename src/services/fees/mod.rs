pub mod bulk;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod payments;
pub mod stats;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::fees::requests::{
    BulkCreateFeesRequest, CreateFeeRequest, FeeExportParams, FeeListParams,
    RecordPaymentRequest, UpdateFeeRequest,
};
use crate::storage::Storage;

pub struct FeeService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeeService {
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

    // 收费列表
    pub async fn list_fees(
        &self,
        query: FeeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_fees(self, query, request).await
    }

    // 创建单个收费项目
    pub async fn create_fee(
        &self,
        fee_data: CreateFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_fee(self, fee_data, request).await
    }

    // 按班级批量创建
    pub async fn bulk_create_fees(
        &self,
        bulk_data: BulkCreateFeesRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::bulk_create_fees(self, bulk_data, request).await
    }

    pub async fn get_fee(&self, fee_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_fee(self, fee_id, request).await
    }

    pub async fn update_fee(
        &self,
        fee_id: i64,
        update_data: UpdateFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_fee(self, fee_id, update_data, request).await
    }

    pub async fn delete_fee(&self, fee_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_fee(self, fee_id, request).await
    }

    // 登记缴费
    pub async fn record_payment(
        &self,
        fee_id: i64,
        payment: RecordPaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payments::record_payment(self, fee_id, payment, request).await
    }

    // 缴费流水
    pub async fn list_payments(
        &self,
        fee_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payments::list_payments(self, fee_id, request).await
    }

    pub async fn fee_stats(
        &self,
        query: FeeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stats::fee_stats(self, query, request).await
    }

    pub async fn export_fees(
        &self,
        query: FeeExportParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_fees(self, query, request).await
    }
}
