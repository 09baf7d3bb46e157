use std::rc::Weak;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ext_logging::{ext_debug, ext_warn};
use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use prfilter_core::{
    first_structural_change, Msg, MutationKind, MutationView, NavigationSignal, TriggerSource,
    WatcherConfig,
};
use prfilter_engine::Platform;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, EventTarget, MutationObserver, MutationObserverInit, MutationRecord,
    Window,
};

use super::dispatcher::{self, Dispatcher};
use super::js_message;

/// Browser timers and trigger sources.
pub(crate) struct BrowserPlatform {
    window: Window,
    document: Document,
    dispatcher: Weak<Dispatcher>,
}

impl BrowserPlatform {
    pub(crate) fn new(window: Window, document: Document, dispatcher: Weak<Dispatcher>) -> Self {
        Self {
            window,
            document,
            dispatcher,
        }
    }

    fn install_url_poll(&self, interval: Duration) -> Result<()> {
        let millis = u32::try_from(interval.as_millis()).context("poll interval too large")?;
        let window = self.window.clone();
        let handle = self.dispatcher.clone();
        Interval::new(millis, move || {
            if let Ok(url) = window.location().href() {
                dispatcher::send(&handle, Msg::UrlPolled { url });
            }
        })
        .forget();
        Ok(())
    }

    fn install_navigation_listener(&self, signal: NavigationSignal) -> Result<()> {
        let handle = self.dispatcher.clone();
        let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_event: Event| {
            dispatcher::send(
                &handle,
                Msg::Triggered {
                    source: TriggerSource::Navigation(signal),
                },
            );
        }));
        let target: &EventTarget = if signal.fires_on_window() {
            self.window.as_ref()
        } else {
            self.document.as_ref()
        };
        target
            .add_event_listener_with_callback(signal.event_name(), callback.as_ref().unchecked_ref())
            .map_err(|err| anyhow!("{}", js_message(&err)))?;
        callback.forget();
        Ok(())
    }

    fn install_structural_observer(&self) -> Result<()> {
        let body = self.document.body().context("document has no body")?;
        let handle = self.dispatcher.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::wrap(Box::new(
            move |records: js_sys::Array, _observer: MutationObserver| {
                let batch: Vec<MutationView> = records
                    .iter()
                    .filter_map(|record| record.dyn_into::<MutationRecord>().ok())
                    .map(|record| mutation_view(&record))
                    .collect();
                if let Some(container_id) = first_structural_change(&batch) {
                    ext_debug!("Content container {} changed", container_id);
                    dispatcher::send(
                        &handle,
                        Msg::Triggered {
                            source: TriggerSource::StructuralChange {
                                container_id: container_id.to_string(),
                            },
                        },
                    );
                }
            },
        ));
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|err| anyhow!("{}", js_message(&err)))?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer
            .observe_with_options(&body, &options)
            .map_err(|err| anyhow!("{}", js_message(&err)))?;
        callback.forget();
        Ok(())
    }
}

fn mutation_view(record: &MutationRecord) -> MutationView {
    let kind = match record.type_().as_str() {
        "childList" => MutationKind::ChildList,
        "attributes" => MutationKind::Attributes,
        _ => MutationKind::CharacterData,
    };
    let target_id = record
        .target()
        .and_then(|node| node.dyn_into::<Element>().ok())
        .map(|element| element.id())
        .unwrap_or_default();
    MutationView { kind, target_id }
}

impl Platform for BrowserPlatform {
    fn schedule(&self, delay: Duration, msg: Msg) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let handle = self.dispatcher.clone();
        spawn_local(async move {
            TimeoutFuture::new(millis).await;
            dispatcher::send(&handle, msg);
        });
    }

    fn install_trigger_sources(&self, config: &WatcherConfig) -> usize {
        let mut installed = 0;
        let mut record = |name: &str, result: Result<()>| match result {
            Ok(()) => installed += 1,
            Err(err) => ext_warn!("Skipping trigger source {}: {:#}", name, err),
        };

        record("url poll", self.install_url_poll(config.poll_interval));
        for signal in NavigationSignal::ALL {
            record(
                signal.event_name(),
                self.install_navigation_listener(signal),
            );
        }
        record("mutation observer", self.install_structural_observer());
        installed
    }
}
