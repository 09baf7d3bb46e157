#![deny(missing_docs)]
//! Shared logging utilities for the PR filter workspace.
//!
//! Every crate logs through the `ext_*` macros so that all output lands under
//! one target, [`TARGET`], which makes the extension's lines easy to pick out
//! of a busy browser console.

/// Log target shared by every message the extension emits.
pub const TARGET: &str = "pr_filter";

#[doc(hidden)]
pub use log;

/// Logs a trace-level message under the extension target.
#[macro_export]
macro_rules! ext_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the extension target.
#[macro_export]
macro_rules! ext_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the extension target.
#[macro_export]
macro_rules! ext_info {
    ($($arg:tt)*) => {{
        $crate::log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the extension target.
#[macro_export]
macro_rules! ext_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the extension target.
#[macro_export]
macro_rules! ext_error {
    ($($arg:tt)*) => {{
        $crate::log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Installs the browser console logger.
///
/// Debug builds log at debug level, release builds at info. Safe to call more
/// than once; later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn initialize_for_browser() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
#[cfg(not(target_arch = "wasm32"))]
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str(TARGET)
        .build();

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
