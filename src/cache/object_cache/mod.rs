pub mod moka;
pub mod redis;
