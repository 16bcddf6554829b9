//! Runtime configuration loaded from the process environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// First generation only.
pub const DEFAULT_ROSTER_SIZE: u32 = 151;

/// Data source settings: where to fetch from and how hard to try.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub roster_size: u32,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            roster_size: DEFAULT_ROSTER_SIZE,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(1000),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Battle settings applied when a session starts.
#[derive(Clone, Debug)]
pub struct BattleConfig {
    pub default_hp: u16,
    pub version_group: String,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            default_hp: 100,
            version_group: "red-blue".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api: ApiConfig,
    pub battle: BattleConfig,
    pub save_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            battle: BattleConfig::default(),
            save_path: PathBuf::from("pokedex-save.json"),
        }
    }
}

impl Config {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `POKEAPI_BASE_URL` - API root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_ROSTER_SIZE` - Number of species in the roster (default: 151)
    /// - `POKEDEX_MAX_RETRIES` - Attempts for initial loads (default: 3)
    /// - `POKEDEX_RETRY_BASE_MS` - First backoff delay, doubled per attempt (default: 1000)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 10)
    /// - `POKEDEX_SAVE_PATH` - File holding the unlocked set (default: pokedex-save.json)
    /// - `POKEDEX_VERSION_GROUP` - Version group moves must be learnable in (default: red-blue)
    /// - `POKEDEX_DEFAULT_HP` - Health both combatants start with (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("POKEAPI_BASE_URL") {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(size) = read_env::<u32>("POKEDEX_ROSTER_SIZE") {
            config.api.roster_size = size.max(1);
        }
        if let Some(retries) = read_env::<u32>("POKEDEX_MAX_RETRIES") {
            config.api.max_retries = retries.max(1);
        }
        if let Some(ms) = read_env::<u64>("POKEDEX_RETRY_BASE_MS") {
            config.api.retry_base_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = read_env::<u64>("POKEDEX_HTTP_TIMEOUT_SECS") {
            config.api.request_timeout = Duration::from_secs(secs.max(1));
        }
        if let Ok(path) = env::var("POKEDEX_SAVE_PATH") {
            config.save_path = PathBuf::from(path);
        }
        if let Ok(group) = env::var("POKEDEX_VERSION_GROUP") {
            config.battle.version_group = group;
        }
        if let Some(hp) = read_env::<u16>("POKEDEX_DEFAULT_HP") {
            config.battle.default_hp = hp.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
