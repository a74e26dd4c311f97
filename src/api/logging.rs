use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{IsTerminal, Write};

const DEFAULT_LOG_PATH: &str = "/tmp/askdoc-debug.log";
const DEBUG_STREAM_ENV: &str = "ASKDOC_DEBUG_STREAM";
const LOG_PATH_ENV: &str = "ASKDOC_LOG_PATH";

pub fn debug_stream_enabled() -> bool {
    std::env::var(DEBUG_STREAM_ENV)
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

pub fn emit_request_payload(request_url: &str, payload: &Value) {
    let formatted_payload = serde_json::to_string_pretty(payload)
        .unwrap_or_else(|_| "<payload serialization error>".to_string());
    let message = format!(
        "ASKDOC DEBUG ask_request url={request_url}\npayload:\n{formatted_payload}\n"
    );
    emit_log_message(&message);
}

/// Records an unterminated frame left in the buffer when the body ended.
/// The tail is never rendered or committed; this trace is the only place a
/// truncated transfer stays observable.
pub fn emit_dropped_tail(tail: &str) {
    let message = format!(
        "ASKDOC WARN dropped_unterminated_tail bytes={}\ntail:\n{tail}\n",
        tail.len()
    );
    emit_log_message(&message);
}

fn emit_log_message(message: &str) {
    if let Some(path) = resolve_log_path() {
        if append_log_file(&path, message).is_ok() {
            return;
        }
    }

    eprintln!("{message}");
}

fn resolve_log_path() -> Option<String> {
    std::env::var(LOG_PATH_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            if std::io::stderr().is_terminal() {
                Some(DEFAULT_LOG_PATH.to_string())
            } else {
                None
            }
        })
}

fn append_log_file(path: &str, message: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(message.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_stream_enabled_accepts_true_variants() {
        let _env_lock = crate::test_support::ENV_LOCK.blocking_lock();
        std::env::set_var(DEBUG_STREAM_ENV, "1");
        assert!(debug_stream_enabled());
        std::env::set_var(DEBUG_STREAM_ENV, "TRUE");
        assert!(debug_stream_enabled());
        std::env::set_var(DEBUG_STREAM_ENV, "0");
        assert!(!debug_stream_enabled());
        std::env::remove_var(DEBUG_STREAM_ENV);
    }

    #[test]
    fn test_resolve_log_path_uses_env_override() {
        let _env_lock = crate::test_support::ENV_LOCK.blocking_lock();
        std::env::set_var(LOG_PATH_ENV, "/tmp/test-askdoc.log");
        assert_eq!(resolve_log_path().as_deref(), Some("/tmp/test-askdoc.log"));
        std::env::remove_var(LOG_PATH_ENV);
    }
}
