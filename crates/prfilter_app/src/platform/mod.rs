//! Browser glue. Only built for `wasm32`.

mod dispatcher;
mod document;
mod triggers;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use ext_logging::{ext_debug, ext_error, ext_info};
use prfilter_core::{Msg, WatcherConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::parse_config;
use dispatcher::Dispatcher;

thread_local! {
    static DISPATCHER: RefCell<Option<Rc<Dispatcher>>> = const { RefCell::new(None) };
}

/// Runs when the module is instantiated; the watcher itself waits for
/// [`start`] or [`start_with_config`].
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    ext_logging::initialize_for_browser();
}

/// Starts watching the page with the default settings.
#[wasm_bindgen]
pub fn start() {
    launch(WatcherConfig::default());
}

/// Starts watching the page with settings given as JSON. Invalid JSON falls
/// back to the defaults.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(json: &str) {
    launch(parse_config(json));
}

fn launch(config: WatcherConfig) {
    if let Err(err) = try_launch(config) {
        ext_error!("PR filter failed to start: {:#}", err);
    }
}

fn try_launch(config: WatcherConfig) -> Result<()> {
    let window = web_sys::window().context("no global window")?;
    let document = window.document().context("window has no document")?;
    let url = window
        .location()
        .href()
        .map_err(|err| anyhow!("cannot read page url: {}", js_message(&err)))?;

    let fresh = DISPATCHER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return None;
        }
        let dispatcher = Dispatcher::new(window, document, config);
        *slot = Some(Rc::clone(&dispatcher));
        Some(dispatcher)
    });

    match fresh {
        Some(dispatcher) => {
            ext_info!("PR filter initialized");
            dispatcher.send(Msg::Started { url });
        }
        None => ext_debug!("PR filter already running"),
    }
    Ok(())
}

/// Best-effort text of a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
