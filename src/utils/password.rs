//! 账号密码哈希（Argon2id，参数来自 `[argon2]` 配置）

use crate::config::{AppConfig, Argon2Config};
use crate::errors::SchoolAdminError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

fn hasher(config: &Argon2Config) -> Result<Argon2<'static>, SchoolAdminError> {
    let params = Params::new(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        None,
    )
    .map_err(|e| SchoolAdminError::validation(format!("Argon2 参数错误: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

pub fn hash_password(password: &str) -> Result<String, SchoolAdminError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher(&AppConfig::get().argon2)?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SchoolAdminError::validation(format!("密码哈希失败: {e}")))
}

/// 哈希串自带参数，校验不受当前配置影响；无法解析的哈希视为不匹配
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("Bursar#2024").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Bursar#2024", &hash));
        assert!(!verify_password("bursar#2024", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("Teacher!1").unwrap();
        let second = hash_password("Teacher!1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("", ""));
    }
}
