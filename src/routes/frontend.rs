//! 管理面板静态资源
//!
//! 嵌入 `frontend/dist` 构建产物，未命中的非 API 路径回退到 `index.html`。
//! `./frontend-custom/` 下的同名文件优先（本地调试用）。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct DashboardAssets;

const INDEX: &str = "index.html";

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn get_mime_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "webmanifest" => "application/manifest+json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 带 hash 的构建产物可以长期缓存
fn should_cache(path: &str) -> bool {
    matches!(
        extension(path),
        "js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "svg" | "webp"
    )
}

/// 替换页面中的 `%SCHOOL_NAME%` 与 `%CURRENCY%` 占位符
fn render_index(content: &[u8], config: &AppConfig) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%SCHOOL_NAME%", &config.app.school_name)
        .replace("%CURRENCY%", &config.app.currency)
        .into_bytes()
}

fn read_asset(path: &str) -> Option<Vec<u8>> {
    // 不允许跳出自定义目录
    let custom = if path.split('/').any(|seg| seg == "..") {
        None
    } else {
        std::fs::read(format!("./frontend-custom/{path}")).ok()
    };
    custom.or_else(|| DashboardAssets::get(path).map(|f| f.data.to_vec()))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    // 未匹配的 API 路径不回退到页面
    if path.starts_with("api/") {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "接口不存在")));
    }

    let (content, file_path) = match (path.is_empty(), read_asset(path)) {
        (false, Some(content)) => (Some(content), path),
        _ => (read_asset(INDEX), INDEX),
    };

    let Some(mut data) = content else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body("<h1>Dashboard assets not found</h1><p>Run <code>cd frontend && bun run build</code>.</p>"));
    };

    let mime = get_mime_type(file_path);
    if file_path == INDEX {
        data = render_index(&data, AppConfig::get());
    }

    let mut response = HttpResponse::Ok();
    response.content_type(mime);
    if should_cache(file_path) {
        response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
    } else {
        response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
    }

    Ok(response.body(data))
}

pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            get_mime_type("assets/app.mjs"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_mime_type("manifest.webmanifest"), "application/manifest+json");
        assert_eq!(get_mime_type("report.xlsx"), "application/octet-stream");
    }

    #[test]
    fn test_should_cache() {
        assert!(should_cache("assets/index-3f2a.js"));
        assert!(should_cache("logo.svg"));
        assert!(!should_cache("index.html"));
        assert!(!should_cache("manifest.json"));
    }
}
