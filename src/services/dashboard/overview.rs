//! 仪表盘总览
//!
//! 汇总学生、教职工、收费、工资与近期作业，按参数组合缓存 30 秒。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::DashboardService;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode, SortOrder,
    dashboard::{
        requests::DashboardQuery,
        responses::{
            DashboardOverview, FeeOverview, PayrollOverview, StaffOverview, StudentOverview,
        },
    },
    fees::{
        requests::{FeeFilter, FeeSortField},
        responses::FeeStats,
    },
    salaries::{
        requests::{SalaryFilter, SalarySortField},
        responses::SalaryStats,
    },
    staff::entities::StaffStatus,
    students::entities::StudentStatus,
};
use crate::services::storage_error_response;
use crate::storage::Storage;
use crate::utils::{dates::current_period, validate::validate_period};

/// 缓存时长（秒）
const CACHE_TTL: u64 = 30;
/// 近期作业的天数窗口
const UPCOMING_DAYS: i64 = 7;
const UPCOMING_LIMIT: u64 = 10;

/// 直接从存储层汇总总览数据
pub async fn build_overview(
    storage: &dyn Storage,
    query: &DashboardQuery,
    period: &str,
) -> Result<DashboardOverview> {
    let students = StudentOverview {
        total: storage.count_students(None).await? as i64,
        active: storage.count_students(Some(StudentStatus::Active)).await? as i64,
        by_class: storage.count_active_students_by_class().await?,
    };

    let staff = StaffOverview {
        total: storage.count_staff(None).await? as i64,
        active: storage.count_staff(Some(StaffStatus::Active)).await? as i64,
    };

    let fee_filter = FeeFilter {
        session: query.session.clone(),
        term: query.term,
        ..Default::default()
    };
    let fee_records = storage
        .list_fees_filtered(&fee_filter, FeeSortField::default(), SortOrder::Asc, None)
        .await?;
    let fee_stats = FeeStats::from_records(&fee_records);

    let salary_filter = SalaryFilter {
        period: Some(period.to_string()),
        ..Default::default()
    };
    let salaries = storage
        .list_salaries_filtered(&salary_filter, SalarySortField::default(), SortOrder::Asc, None)
        .await?;
    let salary_stats = SalaryStats::from_salaries(&salaries);

    let upcoming_assignments = storage
        .list_upcoming_assignments(UPCOMING_DAYS, UPCOMING_LIMIT)
        .await?;

    Ok(DashboardOverview {
        students,
        staff,
        fees: FeeOverview {
            record_count: fee_stats.record_count,
            total_due: fee_stats.total_due,
            total_paid: fee_stats.total_paid,
            total_outstanding: fee_stats.total_outstanding,
            collection_rate: fee_stats.collection_rate,
        },
        payroll: PayrollOverview {
            period: period.to_string(),
            record_count: salary_stats.record_count,
            total_net: salary_stats.total_net,
            paid_amount: salary_stats.paid_amount,
            pending_amount: salary_stats.pending_amount,
        },
        upcoming_assignments,
        generated_at: chrono::Utc::now(),
    })
}

pub async fn overview(
    service: &DashboardService,
    query: DashboardQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let period = match query.period.as_deref().map(str::trim) {
        Some(period) => {
            if let Err(msg) = validate_period(period) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
            }
            period.to_string()
        }
        None => current_period(),
    };

    let cache = service.get_cache(request);
    let cache_key = query.cache_key(&period);

    if let Some(cache) = &cache
        && let Some(cached) = cache.get_json::<DashboardOverview>(&cache_key).await
    {
        debug!("Dashboard overview served from cache: {}", cache_key);
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            cached,
            "Dashboard overview retrieved successfully",
        )));
    }

    let storage = service.get_storage(request);
    match build_overview(storage.as_ref(), &query, &period).await {
        Ok(overview) => {
            if let Some(cache) = &cache {
                cache.insert_json(cache_key, &overview, CACHE_TTL).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                overview,
                "Dashboard overview retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            ErrorCode::InternalServerError,
            "Failed to build dashboard overview",
            e,
        )),
    }
}
