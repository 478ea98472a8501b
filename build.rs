use std::env;
use std::fs;
use std::path::Path;

const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>学校管理后台 - 管理面板未构建</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 640px;
            margin: 100px auto;
            padding: 20px;
            text-align: center;
        }
        .notice {
            background: #eef6ff;
            border: 1px solid #b6d4fe;
            padding: 20px;
            border-radius: 8px;
            margin: 20px 0;
        }
        code {
            background: #f1f3f4;
            padding: 2px 6px;
            border-radius: 4px;
            font-family: monospace;
        }
    </style>
</head>
<body>
    <h1>学校管理后台</h1>
    <div class="notice">
        <h2>管理面板未构建</h2>
        <p>API 服务已可用，接口前缀为 <code>/api/v1</code>。</p>
        <p>构建管理面板：</p>
        <p><code>cd frontend && bun install && bun run build</code></p>
    </div>
</body>
</html>"#;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.exists() {
        println!("cargo:warning=frontend/dist not found, embedding fallback page");
        write_fallback(&dist_path);
    }
}

// rust-embed 要求目录在编译期存在
fn write_fallback(dist_path: &Path) {
    fs::create_dir_all(dist_path.join("assets")).expect("Failed to create dist directory");
    fs::write(dist_path.join("index.html"), FALLBACK_INDEX)
        .expect("Failed to write fallback index.html");
    fs::write(dist_path.join("favicon.ico"), []).expect("Failed to write fallback favicon");
}
