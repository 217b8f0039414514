use super::*;
use std::collections::HashMap;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::new();
    assert_eq!(config.top_n, 5);
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.users_path(), PathBuf::from("datas/users.json"));
    assert_eq!(config.posts_path(), PathBuf::from("datas/posts.json"));
    assert_eq!(config.missing_count, MissingCountPolicy::ZeroFill);
    assert_eq!(config.cache_policy(), CachePolicy::Reuse);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml(
        r#"
top_n = 3
timeout = "30s"
max_age = "1h"
missing_count = "drop"
output_dir = "out"
"#,
    )
    .unwrap();

    assert_eq!(config.top_n, 3);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_age, Some(Duration::from_secs(3600)));
    assert_eq!(config.missing_count, MissingCountPolicy::Drop);
    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert_eq!(config.data_dir, PathBuf::from("datas"));
    assert_eq!(
        config.cache_policy(),
        CachePolicy::MaxAge(Duration::from_secs(3600))
    );
}

#[test]
fn test_unknown_keys_are_rejected() {
    let err = Config::from_toml("top_m = 3").unwrap_err();
    assert!(matches!(err, Error::Toml(_)));
}

#[test]
fn test_env_overrides() {
    let mut config = Config::new();
    config
        .merge_env_with(env(&[
            ("USER_ACTIVITY_USERS_URL", "http://localhost:8080/users"),
            ("USER_ACTIVITY_DATA_DIR", "/tmp/data"),
            ("USER_ACTIVITY_TOP_N", "10"),
            ("USER_ACTIVITY_TIMEOUT", "2s"),
            ("USER_ACTIVITY_MAX_AGE", "15m"),
            ("USER_ACTIVITY_MISSING_COUNT", "drop"),
        ]))
        .unwrap();

    assert_eq!(config.users_url, "http://localhost:8080/users");
    assert_eq!(config.data_dir, PathBuf::from("/tmp/data"));
    assert_eq!(config.top_n, 10);
    assert_eq!(config.timeout, Duration::from_secs(2));
    assert_eq!(config.max_age, Some(Duration::from_secs(900)));
    assert_eq!(config.missing_count, MissingCountPolicy::Drop);
    assert_eq!(
        config.posts_url,
        "https://jsonplaceholder.typicode.com/posts"
    );
}

#[test]
fn test_invalid_env_values() {
    let mut config = Config::new();
    assert!(config
        .merge_env_with(env(&[("USER_ACTIVITY_TOP_N", "-1")]))
        .is_err());
    assert!(config
        .merge_env_with(env(&[("USER_ACTIVITY_TIMEOUT", "soon")]))
        .is_err());
    assert!(config
        .merge_env_with(env(&[("USER_ACTIVITY_MISSING_COUNT", "maybe")]))
        .is_err());
}

#[test]
fn test_validate_rejects_bad_values() {
    let config = Config {
        timeout: Duration::ZERO,
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        users_url: "  ".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_load_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    std::fs::write(&path, "top_n = 7\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.top_n, 7);
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(Some(&temp_dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
