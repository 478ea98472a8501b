use serde::Deserialize;

/// 应用配置
///
/// 加载顺序与默认值见 `AppConfig::load`。
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub argon2: Argon2Config,
    pub cors: CorsConfig,
    pub import: ImportConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub school_name: String,
    pub environment: String,
    pub log_level: String,
    pub currency: String, // 金额显示币种，例如 NGN
}

/// `[server]`，`workers = 0` 表示按 CPU 核数取值（不超过 `max_workers`）
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub keep_alive_secs: u64,
    pub request_timeout_ms: u64,
    pub disconnect_timeout_ms: u64,
    pub max_payload_bytes: usize,
}

/// access token 以分钟计，refresh token 以天计
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    pub refresh_token_remember_me_expiry: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String, // 所有键统一加此前缀，多个实例共用一个 Redis 时区分
}

/// 内存缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>, // 含 "*" 时允许任意来源
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// Argon2 密码哈希参数
#[derive(Debug, Clone, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

/// 批量导入配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub max_rows: usize, // 单次导入最大行数
}

/// 报表导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub max_rows: u64, // 单次导出最大行数
}
