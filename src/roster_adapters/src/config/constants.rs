pub mod env {
    pub const CONFIG_PATH_ENV_VAR: &str = "ROSTER_CONFIG";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const ENV_PREFIX: &str = "ROSTER";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const DEFAULT_CONFIG_PATH: &str = "config/roster.json";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Argon2id cost parameters used for every stored password.
pub mod hashing {
    pub const MEMORY_KIB: u32 = 15000;
    pub const ITERATIONS: u32 = 2;
    pub const PARALLELISM: u32 = 1;
}
