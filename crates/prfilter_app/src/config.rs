use ext_logging::ext_warn;
use prfilter_core::WatcherConfig;

/// Reads watcher settings handed over by the extension loader.
///
/// Missing fields keep their defaults. Blank input means "no overrides"; input
/// that does not parse is logged and replaced by the defaults so the filter
/// still comes up.
pub fn parse_config(json: &str) -> WatcherConfig {
    if json.trim().is_empty() {
        return WatcherConfig::default();
    }
    match serde_json::from_str(json) {
        Ok(config) => config,
        Err(err) => {
            ext_warn!("Ignoring invalid watcher config: {}", err);
            WatcherConfig::default()
        }
    }
}
