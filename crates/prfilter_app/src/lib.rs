//! Browser content script for the issue list PR-link filter.
//!
//! The wasm build wires the engine's [`prfilter_engine::Runtime`] to the real
//! page: `web-sys` for the document, `gloo-timers` for scheduling, and the
//! browser's navigation events and mutation observer as trigger sources.
//! Everything that does not touch the browser is built for every target so it
//! can be tested natively.
pub mod config;
pub mod markup;

#[cfg(target_arch = "wasm32")]
mod platform;

#[cfg(target_arch = "wasm32")]
pub use platform::{start, start_with_config};
