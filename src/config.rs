use crate::state::history::CONTEXT_WINDOW_TURNS;
use crate::util::parse_bool_flag;
use anyhow::{bail, Result};

const SERVER_URL_ENV: &str = "ASKDOC_SERVER_URL";
const HISTORY_WINDOW_ENV: &str = "ASKDOC_HISTORY_WINDOW";
const PLAIN_OUTPUT_ENV: &str = "ASKDOC_PLAIN";

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub history_window: usize,
    pub plain_output: bool,
}

impl Config {
    pub fn load() -> Self {
        let server_url = std::env::var(SERVER_URL_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let history_window =
            env_override_usize(HISTORY_WINDOW_ENV, CONTEXT_WINDOW_TURNS, 2, 200);
        let plain_output = std::env::var(PLAIN_OUTPUT_ENV)
            .ok()
            .and_then(parse_bool_flag)
            .unwrap_or(false);

        Self {
            server_url,
            history_window,
            plain_output,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            bail!(
                "Invalid {} '{}': expected http:// or https:// URL",
                SERVER_URL_ENV,
                self.server_url
            );
        }
        Ok(())
    }
}

pub(crate) fn env_override_usize(key: &str, default: usize, min: usize, max: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .map(|v| v.clamp(min, max))
        .unwrap_or(default)
}
