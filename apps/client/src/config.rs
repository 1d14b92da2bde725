use anyhow::{bail, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let raw = optional_env("API_BASE_URL")
            .or_else(|| optional_env("NEXT_PUBLIC_API_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Config {
            api_base_url: normalize_base_url(&raw)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Trims whitespace and trailing slashes; rejects anything that is not http(s).
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        bail!("API base URL must start with http:// or https:// (got '{raw}')");
    }
    Ok(trimmed.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
