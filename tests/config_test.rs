//! Configuration loading tests

use std::io::Write;

use kabar::config::Config;
use tempfile::NamedTempFile;

const FULL_CONFIG: &str = r#"
[server]
bind_address = "0.0.0.0:9000"
enable_cors = true
enable_request_logging = false

[backend]
base_url = "http://backend:5000"
request_timeout_secs = 15
retry_count = 3
retry_delay_ms = 250

[session]
cookie_name = "kabar_session"
idle_timeout_secs = 3600
sweep_interval_secs = 30

[auth]
allow_guest = false

[[auth.users]]
username = "ana"
password_sha256 = "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"

[ui]
locale = "id"
recent_limit = 5
favorites_limit = 50
history_limit = 20

[logging]
level = "debug"
format = "json"
"#;

#[test]
fn test_load_full_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FULL_CONFIG.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.server.bind_address.port(), 9000);
    assert!(config.server.enable_cors);
    assert_eq!(config.backend.base_url, "http://backend:5000");
    assert_eq!(config.backend.retry_count, 3);
    assert_eq!(config.session.idle_timeout_secs, 3600);
    assert!(!config.auth.allow_guest);
    assert_eq!(config.auth.users.len(), 1);
    assert_eq!(config.ui.recent_limit, 5);
    assert_eq!(config.logging.format, "json");

    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_errors() {
    let err = Config::from_file(std::path::Path::new("/nonexistent/kabar.toml"));
    assert!(err.is_err());
}

#[test]
fn test_malformed_toml_errors() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[server\nbind_address = ").unwrap();

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_guest_disabled_without_users_is_invalid() {
    let mut file = NamedTempFile::new().unwrap();
    let toml = FULL_CONFIG.replace(
        "[[auth.users]]\nusername = \"ana\"\npassword_sha256 = \"2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b\"\n",
        "",
    );
    file.write_all(toml.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_toml_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.ui.locale = "en".to_string();
    config.backend.retry_count = 7;

    let serialized = toml::to_string(&config).unwrap();
    let reparsed: Config = toml::from_str(&serialized).unwrap();
    assert_eq!(reparsed.ui.locale, "en");
    assert_eq!(reparsed.backend.retry_count, 7);
}
