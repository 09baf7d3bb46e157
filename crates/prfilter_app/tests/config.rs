use std::time::Duration;

use pretty_assertions::assert_eq;
use prfilter_app::config::parse_config;
use prfilter_core::WatcherConfig;

#[test]
fn blank_input_uses_defaults() {
    ext_logging::initialize_for_tests();
    assert_eq!(parse_config(""), WatcherConfig::default());
    assert_eq!(parse_config("  \n"), WatcherConfig::default());
}

#[test]
fn partial_overrides_keep_other_defaults() {
    ext_logging::initialize_for_tests();
    let config = parse_config(r#"{"settle_delay_ms": 250, "retry": {"max_attempts": 3}}"#);

    assert_eq!(config.settle_delay, Duration::from_millis(250));
    assert_eq!(config.poll_interval, Duration::from_millis(500));
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.max_delay, Duration::from_secs(4));
}

#[test]
fn invalid_json_falls_back_to_defaults() {
    ext_logging::initialize_for_tests();
    assert_eq!(parse_config("{not json"), WatcherConfig::default());
    assert_eq!(
        parse_config(r#"{"poll_interval_ms": "fast"}"#),
        WatcherConfig::default()
    );
}
