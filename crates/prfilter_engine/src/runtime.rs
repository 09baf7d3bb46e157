use std::collections::VecDeque;

use ext_logging::{ext_debug, ext_info, ext_warn};
use prfilter_core::{update, Effect, Msg, WatcherConfig, WatcherState};

use crate::{HostDocument, Platform, Reconciler};

/// Feeds messages through [`update`] and executes the resulting effects
/// against the document and platform.
///
/// Messages produced while an effect runs are queued and handled in order
/// after it, so a single `dispatch` call drains the whole cascade.
pub struct Runtime<D, P> {
    state: WatcherState,
    reconciler: Reconciler<D>,
    platform: P,
    inbox: VecDeque<Msg>,
}

impl<D: HostDocument, P: Platform> Runtime<D, P> {
    pub fn new(doc: D, platform: P, config: WatcherConfig) -> Self {
        Self {
            state: WatcherState::with_config(config),
            reconciler: Reconciler::new(doc),
            platform,
            inbox: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &WatcherState {
        &self.state
    }

    pub fn reconciler(&self) -> &Reconciler<D> {
        &self.reconciler
    }

    pub fn document(&self) -> &D {
        self.reconciler.document()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Activates the watcher for the current page. Later calls are ignored.
    pub fn start(&mut self) {
        let url = self.document().current_url();
        self.dispatch(Msg::Started { url });
    }

    /// One tick of the URL poll.
    pub fn poll(&mut self) {
        let url = self.document().current_url();
        self.dispatch(Msg::UrlPolled { url });
    }

    pub fn dispatch(&mut self, msg: Msg) {
        self.inbox.push_back(msg);
        while let Some(msg) = self.inbox.pop_front() {
            self.process(msg);
        }
    }

    fn process(&mut self, msg: Msg) {
        match &msg {
            Msg::Observed { source, .. } => ext_debug!("Re-evaluating after {:?}", source),
            Msg::SettleElapsed { generation } | Msg::RetryElapsed { generation, .. }
                if !self.state.is_current(*generation) =>
            {
                ext_debug!(
                    "Dropping stale reconciliation (generation {} < {})",
                    generation,
                    self.state.generation()
                );
            }
            _ => {}
        }

        let is_observation = matches!(msg, Msg::Observed { .. });
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        if is_observation {
            if let Some(classification) = self.state.last_classification() {
                match classification.signal {
                    Some(signal) => ext_info!("Issues page detected via {:?}", signal),
                    None => ext_debug!("Not an issues page"),
                }
            }
        }

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::InstallWatchers => {
                let installed = self.platform.install_trigger_sources(self.state.config());
                ext_info!("Monitoring for issues pages ({} trigger sources)", installed);
            }
            Effect::Observe { source } => {
                let page = self.document().snapshot();
                self.inbox.push_back(Msg::Observed { source, page });
            }
            Effect::ScheduleSettle { generation, delay } => {
                self.platform.schedule(delay, Msg::SettleElapsed { generation });
            }
            Effect::EnsureControl {
                generation,
                attempt,
            } => {
                let outcome = self.reconciler.ensure_control();
                self.inbox.push_back(Msg::EnsureFinished {
                    generation,
                    attempt,
                    outcome,
                });
            }
            Effect::ScheduleRetry {
                generation,
                attempt,
                delay,
            } => {
                ext_debug!("Toolbar missing, retry {} in {:?}", attempt, delay);
                self.platform.schedule(
                    delay,
                    Msg::RetryElapsed {
                        generation,
                        attempt,
                    },
                );
            }
            Effect::RemoveControl => {
                if let Err(err) = self.reconciler.remove_control() {
                    ext_warn!("Failed to remove filter control: {}", err);
                }
            }
            Effect::RefreshVisual => {
                if let Err(err) = self.reconciler.refresh_visual_state() {
                    ext_warn!("Failed to refresh filter control: {}", err);
                }
            }
            Effect::ToggleMenu => {
                if let Err(err) = self.reconciler.toggle_menu() {
                    ext_warn!("Failed to toggle filter menu: {}", err);
                }
            }
            Effect::CloseMenu => {
                if let Err(err) = self.reconciler.close_menu() {
                    ext_warn!("Failed to close filter menu: {}", err);
                }
            }
            Effect::ApplyFilter { filter } => {
                if let Err(err) = self.reconciler.apply_filter(filter) {
                    ext_warn!("Failed to apply filter {}: {}", filter, err);
                }
            }
            Effect::GaveUp {
                generation,
                attempts,
            } => {
                ext_warn!(
                    "Toolbar never appeared; giving up after {} attempts (generation {})",
                    attempts,
                    generation
                );
            }
        }
    }
}
