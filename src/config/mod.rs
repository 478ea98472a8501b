//! 配置管理
//!
//! 配置加载顺序：内置默认值 → `config.toml` → `config.{APP_ENV}.toml` →
//! `SCHOOLADMIN__SECTION__KEY` 环境变量 → `JWT_SECRET`、`DATABASE_URL` 等常用环境变量。

mod r#impl;
mod structs;

pub use structs::*;
