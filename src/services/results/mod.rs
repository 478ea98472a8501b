pub mod delete;
pub mod export;
pub mod list;
pub mod sheet;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::results::requests::{
    ClassSummaryParams, ResultExportParams, ResultListParams, SaveResultSheetRequest,
};
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    // 保存成绩表（幂等）
    pub async fn save_sheet(
        &self,
        sheet: SaveResultSheetRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        sheet::save_sheet(self, sheet, request).await
    }

    pub async fn list_results(
        &self,
        query: ResultListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_results(self, query, request).await
    }

    // 班级学期汇总
    pub async fn class_summary(
        &self,
        query: ClassSummaryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::class_summary(self, query, request).await
    }

    pub async fn export_results(
        &self,
        query: ResultExportParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_results(self, query, request).await
    }

    pub async fn delete_result(
        &self,
        result_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_result(self, result_id, request).await
    }
}
