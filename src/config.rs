use std::env;
use std::path::PathBuf;

/// How reads (and a cycle's "current state") obtain the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Serve from the in-memory mirror refreshed by each cycle (default).
    Cache,
    /// Re-read the data file on every request and every cycle.
    File,
}

impl ReadMode {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            _ => Self::Cache,
        }
    }
}

/// Hub configuration derived from environment variables.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub bind: String,
    pub port: u16,

    /// Upstream hotlist endpoint and its paging parameters.
    pub upstream_url: String,
    pub page: u32,
    pub limit: u32,

    /// Seconds between ingestion cycles.
    pub poll_secs: u64,
    pub http_timeout_secs: u64,

    pub data_file: PathBuf,
    pub read_mode: ReadMode,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl HubConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_str("HOTLIST_BIND", "127.0.0.1"),
            port: env_u16("HOTLIST_PORT", 61080),
            upstream_url: env_str(
                "HOTLIST_UPSTREAM_URL",
                "https://suoluosi.net/blockchain/getHotlist",
            ),
            page: env_u32("HOTLIST_PAGE", 1),
            limit: env_u32("HOTLIST_LIMIT", 10),
            poll_secs: env_u64("HOTLIST_POLL_SECS", 30).max(1),
            http_timeout_secs: env_u64("HOTLIST_HTTP_TIMEOUT_SECS", 10).max(1),
            data_file: PathBuf::from(env_str("HOTLIST_DATA_FILE", "./data.json")),
            read_mode: ReadMode::parse(&env_str("HOTLIST_READ_MODE", "cache")),
        }
    }
}
