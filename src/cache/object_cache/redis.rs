//! Redis 缓存后端
//!
//! 多实例部署时共享登录态与看板缓存。所有键加 `cache.redis.key_prefix` 前缀。

use async_trait::async_trait;
use redis::{AsyncCommands, RedisResult, aio::MultiplexedConnection};
use std::sync::Mutex;
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

pub struct RedisObjectCache {
    client: redis::Client,
    // 复用的多路复用连接，出错后丢弃并在下次使用时重连
    connection: Mutex<Option<MultiplexedConnection>>,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        let client = redis::Client::open(redis_config.url.as_str())
            .map_err(|e| format!("Invalid Redis URL '{}': {e}", redis_config.url))?;

        // 启动时同步 PING 一次，连不上就让调用方回退到内存缓存
        let mut conn = client
            .get_connection()
            .map_err(|e| format!("Redis connect to {} failed: {e}", redis_config.url))?;
        redis::cmd("PING")
            .query::<String>(&mut conn)
            .map_err(|e| format!("Redis ping failed: {e}"))?;

        debug!(
            "Redis cache ready at {} (prefix '{}', ttl {}s)",
            redis_config.url, redis_config.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            client,
            connection: Mutex::new(None),
            key_prefix: redis_config.key_prefix.clone(),
            default_ttl: config.cache.default_ttl,
        })
    }

    async fn connection(&self) -> RedisResult<MultiplexedConnection> {
        let cached = self.connection.lock().ok().and_then(|slot| slot.clone());
        if let Some(conn) = cached {
            return Ok(conn);
        }
        let conn = self.client.get_multiplexed_async_connection().await?;
        if let Ok(mut slot) = self.connection.lock() {
            *slot = Some(conn.clone());
        }
        Ok(conn)
    }

    fn drop_connection(&self) {
        if let Ok(mut slot) = self.connection.lock() {
            slot.take();
        }
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    fn effective_ttl(&self, ttl: u64) -> u64 {
        if ttl == 0 { self.default_ttl } else { ttl }
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Redis unavailable: {}", e);
                return CacheResult::ExistsButNoValue;
            }
        };

        match conn.get::<_, Option<String>>(self.prefixed(key)).await {
            Ok(Some(value)) => CacheResult::Found(value),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                warn!("Redis GET {} failed: {}", key, e);
                self.drop_connection();
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = self.effective_ttl(ttl);
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Redis unavailable: {}", e);
                return;
            }
        };

        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.prefixed(&key), value, ttl)
            .await
        {
            warn!("Redis SETEX {} failed: {}", key, e);
            self.drop_connection();
        }
    }

    async fn remove(&self, key: &str) {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Redis unavailable: {}", e);
                return;
            }
        };

        if let Err(e) = conn.del::<_, i64>(self.prefixed(key)).await {
            warn!("Redis DEL {} failed: {}", key, e);
            self.drop_connection();
        }
    }

    async fn invalidate_all(&self) {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Redis unavailable: {}", e);
                return;
            }
        };

        // 只清理本实例前缀下的键
        let pattern = self.prefixed("*");
        let keys: Vec<String> = match conn.keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Redis KEYS {} failed: {}", pattern, e);
                self.drop_connection();
                return;
            }
        };

        if !keys.is_empty()
            && let Err(e) = conn.del::<_, i64>(keys).await
        {
            warn!("Redis DEL for {} failed: {}", pattern, e);
        }
    }
}
