use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 开发用的默认密钥，生产环境必须覆盖
const DEV_JWT_SECRET: &str = "change-me-in-production";

/// 兼容常见部署方式的独立环境变量 -> 配置键
const ENV_ALIASES: &[(&str, &str)] = &[
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SCHOOL_NAME", "app.school_name"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("UNIX_SOCKET", "server.unix_socket_path"),
    ("CPU_COUNT", "server.workers"),
    ("JWT_SECRET", "jwt.secret"),
    ("DATABASE_URL", "database.url"),
    ("REDIS_URL", "cache.redis.url"),
    ("REDIS_KEY_PREFIX", "cache.redis.key_prefix"),
];

impl AppConfig {
    /// 按 内置默认值 < config.toml < config.{APP_ENV}.toml < SCHOOLADMIN_* < 独立环境变量 的顺序合并配置
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .set_default("app.school_name", "School")?
            .set_default("app.environment", environment.as_str())?
            .set_default("app.log_level", "info")?
            .set_default("app.currency", "NGN")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.unix_socket_path", "")?
            .set_default("server.workers", 0)?
            .set_default("server.max_workers", 8)?
            .set_default("server.keep_alive_secs", 30)?
            .set_default("server.request_timeout_ms", 5000)?
            .set_default("server.disconnect_timeout_ms", 1000)?
            .set_default("server.max_payload_bytes", 10 * 1024 * 1024)?
            .set_default("jwt.secret", DEV_JWT_SECRET)?
            .set_default("jwt.access_token_expiry", 30)?
            .set_default("jwt.refresh_token_expiry", 7)?
            .set_default("jwt.refresh_token_remember_me_expiry", 30)?
            .set_default("database.url", "school_admin.db")?
            .set_default("database.pool_size", 10)?
            .set_default("database.timeout", 30)?
            .set_default("cache.type", "moka")?
            .set_default("cache.default_ttl", 3600)?
            .set_default("cache.redis.url", "redis://127.0.0.1:6379")?
            .set_default("cache.redis.key_prefix", "school_admin:")?
            .set_default("cache.memory.max_capacity", 10000)?
            .set_default("argon2.memory_cost", 19456)?
            .set_default("argon2.time_cost", 2)?
            .set_default("argon2.parallelism", 1)?
            .set_default("cors.allowed_origins", vec!["*"])?
            .set_default(
                "cors.allowed_methods",
                vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"],
            )?
            .set_default("cors.allowed_headers", vec!["Authorization", "Content-Type"])?
            .set_default("cors.max_age", 3600)?
            .set_default("import.max_rows", 1000)?
            .set_default("export.max_rows", 10000)?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{environment}")).required(false))
            .add_source(
                Environment::with_prefix("SCHOOLADMIN")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in ENV_ALIASES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// 启动前的一致性检查
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret 不能为空".into()));
        }
        if self.is_production() && self.jwt.secret == DEV_JWT_SECRET {
            return Err(ConfigError::Message(
                "生产环境必须通过 JWT_SECRET 设置 jwt.secret".into(),
            ));
        }
        if self.jwt.access_token_expiry <= 0
            || self.jwt.refresh_token_expiry <= 0
            || self.jwt.refresh_token_remember_me_expiry < self.jwt.refresh_token_expiry
        {
            return Err(ConfigError::Message("jwt 有效期配置无效".into()));
        }
        if self.import.max_rows == 0 || self.export.max_rows == 0 {
            return Err(ConfigError::Message(
                "import.max_rows 与 export.max_rows 必须大于 0".into(),
            ));
        }
        Ok(())
    }

    /// 全局配置，首次访问时加载
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时显式加载，便于把配置错误作为启动失败报告
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        Some(self.server.unix_socket_path.as_str()).filter(|path| !path.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_config_passes_validation() {
        let config = AppConfig::get();
        assert!(config.validate().is_ok());
        assert!(config.jwt.access_token_expiry > 0);
        assert!(!config.app.currency.is_empty());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let mut config = AppConfig::get().clone();
        config.app.environment = "production".into();
        config.jwt.secret = DEV_JWT_SECRET.into();
        assert!(config.validate().is_err());

        config.jwt.secret = "a-real-secret".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remember_me_must_outlive_normal_refresh() {
        let mut config = AppConfig::get().clone();
        config.jwt.refresh_token_expiry = 30;
        config.jwt.refresh_token_remember_me_expiry = 7;
        assert!(config.validate().is_err());
    }
}
