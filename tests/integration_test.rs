use askdoc::config::Config;
use askdoc::state::{ChatHistory, CONTEXT_WINDOW_TURNS};
use askdoc::types::{ChatRole, ChatTurn};

#[test]
fn test_config_validation_rejects_non_http_server_url() {
    let config = Config {
        server_url: "ftp://localhost:8080".to_string(),
        history_window: CONTEXT_WINDOW_TURNS,
        plain_output: false,
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_accepts_https_server_url() {
    let config = Config {
        server_url: "https://chat.example.com".to_string(),
        history_window: CONTEXT_WINDOW_TURNS,
        plain_output: true,
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_history_window_is_a_bounded_suffix() {
    let mut history = ChatHistory::new();
    for i in 0..25 {
        history.append(ChatTurn::user(format!("q{i}")));
    }

    let window = history.window(CONTEXT_WINDOW_TURNS);
    assert_eq!(window.len(), CONTEXT_WINDOW_TURNS);
    assert_eq!(window.first().map(|t| t.content.as_str()), Some("q5"));
    assert_eq!(window.last().map(|t| t.content.as_str()), Some("q24"));
    assert!(window.iter().all(|t| t.role == ChatRole::User));
}
