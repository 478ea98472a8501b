//! 启动准备：数据库、初始管理员与缓存后端

use crate::cache::ObjectCache;
use crate::cache::register::{get_object_cache_plugin, registered_object_cache_plugins};
use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

const FALLBACK_CACHE: &str = "moka";

async fn build_cache(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let Some(constructor) = get_object_cache_plugin(name) else {
        warn!("Unknown cache backend '{}'", name);
        return None;
    };
    match constructor().await {
        Ok(cache) => Some(Arc::from(cache)),
        Err(e) => {
            warn!("Cache backend '{}' unavailable: {}", name, e);
            None
        }
    }
}

/// 按 `cache.type` 选择缓存后端，不可用时退回内存缓存
async fn create_cache() -> std::io::Result<Arc<dyn ObjectCache>> {
    let wanted = AppConfig::get().cache.cache_type.as_str();
    debug!(
        "Cache backends compiled in: {:?}",
        registered_object_cache_plugins()
    );

    if let Some(cache) = build_cache(wanted).await {
        info!("Using {} cache", wanted);
        return Ok(cache);
    }
    if wanted != FALLBACK_CACHE
        && let Some(cache) = build_cache(FALLBACK_CACHE).await
    {
        warn!("Falling back to {} cache", FALLBACK_CACHE);
        return Ok(cache);
    }
    Err(std::io::Error::other(format!(
        "no usable cache backend (configured: {wanted})"
    )))
}

/// 生成满足密码策略的随机初始密码（大小写字母、数字、符号各至少一个）
fn generate_initial_password(length: usize) -> String {
    const GROUPS: [&[u8]; 4] = [
        b"ABCDEFGHJKLMNPQRSTUVWXYZ",
        b"abcdefghijkmnopqrstuvwxyz",
        b"23456789",
        b"!@#$%&*?",
    ];
    let mut rng = rand::rng();
    let mut chars: Vec<char> = GROUPS
        .iter()
        .map(|group| group[rng.random_range(0..group.len())] as char)
        .collect();
    let all: Vec<u8> = GROUPS.concat();
    while chars.len() < length {
        chars.push(all[rng.random_range(0..all.len())] as char);
    }
    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}

/// 空库时创建初始管理员，密码取 `ADMIN_PASSWORD`，未设置时随机生成并打印一次
async fn seed_admin(storage: &dyn Storage) {
    match storage.count_users().await {
        Ok(0) => info!("No accounts yet, creating the initial administrator"),
        Ok(count) => {
            debug!("{} account(s) present, skipping admin seed", count);
            return;
        }
        Err(e) => {
            error!("Failed to count accounts, skipping admin seed: {}", e);
            return;
        }
    }

    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ => {
            let generated = generate_initial_password(16);
            warn!("ADMIN_PASSWORD is not set; initial password for 'admin': {}", generated);
            warn!("Change it after the first login.");
            generated
        }
    };

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash initial admin password: {}", e);
            return;
        }
    };

    let request = CreateUserRequest {
        username: "admin".to_string(),
        email: "admin@school.local".to_string(),
        password: password_hash,
        role: UserRole::Admin,
        display_name: Some(format!("{} Administrator", AppConfig::get().app.school_name)),
    };

    match storage.create_user(request).await {
        Ok(user) => info!("Initial administrator created (id {})", user.id),
        Err(e) => error!("Failed to create initial administrator: {}", e),
    }
}

pub async fn prepare_server_startup() -> std::io::Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| std::io::Error::other("rustls crypto provider already installed"))?;

    let storage = crate::storage::create_storage()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!("Database ready, migrations applied");

    seed_admin(storage.as_ref()).await;

    let cache = create_cache().await?;

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password_simple;

    #[test]
    fn test_generated_password_meets_policy() {
        for _ in 0..20 {
            let password = generate_initial_password(16);
            assert_eq!(password.chars().count(), 16);
            assert!(validate_password_simple(&password).is_ok(), "{password}");
        }
    }
}
