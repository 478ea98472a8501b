//! 学校管理后台服务端
//!
//! 学生档案、教职工与工资、收费、成绩、作业与仪表盘统计，
//! 列表接口统一支持筛选、排序、分页，报表可导出为 CSV 或 XLSX。
//!
//! 请求自上而下经过 `routes` → `middlewares` → `services` → `storage`，
//! 账号缓存与仪表盘缓存走 `cache`，配置由 `config` 在启动时加载一次。

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
