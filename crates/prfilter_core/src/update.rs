use crate::{
    classify, Effect, EnsureOutcome, Msg, ReconcileStatus, TriggerSource, WatcherState,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WatcherState, msg: Msg) -> (WatcherState, Vec<Effect>) {
    if let Msg::Started { url } = msg {
        if state.is_active() {
            // Sources are already installed; a second start must not double them.
            return (state, Vec::new());
        }
        state.activate(url);
        let effects = vec![
            Effect::InstallWatchers,
            Effect::Observe {
                source: TriggerSource::Startup,
            },
        ];
        return (state, effects);
    }

    if !state.is_active() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Started { .. } | Msg::NoOp => Vec::new(),
        Msg::Triggered { source } => vec![Effect::Observe { source }],
        Msg::UrlPolled { url } => {
            if state.observe_url(url) {
                vec![Effect::Observe {
                    source: TriggerSource::UrlPoll,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::Observed { source: _, page } => {
            let classification = classify(&page);
            let was_attached = state.control_attached();
            let generation = state.next_generation(classification);
            if classification.is_target_view {
                state.set_status(ReconcileStatus::Pending {
                    generation,
                    attempt: 1,
                });
                let mut effects = Vec::with_capacity(2);
                if was_attached {
                    effects.push(Effect::RefreshVisual);
                }
                effects.push(Effect::ScheduleSettle {
                    generation,
                    delay: state.config().settle_delay,
                });
                effects
            } else {
                state.set_status(ReconcileStatus::Absent);
                vec![Effect::RemoveControl]
            }
        }
        Msg::SettleElapsed { generation } => {
            if state.is_current(generation) {
                vec![Effect::EnsureControl {
                    generation,
                    attempt: 1,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::RetryElapsed {
            generation,
            attempt,
        } => {
            if state.is_current(generation) {
                vec![Effect::EnsureControl {
                    generation,
                    attempt,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::EnsureFinished {
            generation,
            attempt,
            outcome,
        } => {
            if !state.is_current(generation) {
                return (state, Vec::new());
            }
            match outcome {
                EnsureOutcome::Attached { .. } => {
                    state.set_status(ReconcileStatus::Attached { generation });
                    Vec::new()
                }
                EnsureOutcome::ToolbarMissing => {
                    let next = attempt + 1;
                    let retry = &state.config().retry;
                    if retry.allows(next) {
                        let delay = retry.delay_before(next);
                        state.set_status(ReconcileStatus::Pending {
                            generation,
                            attempt: next,
                        });
                        vec![Effect::ScheduleRetry {
                            generation,
                            attempt: next,
                            delay,
                        }]
                    } else {
                        state.set_status(ReconcileStatus::GaveUp {
                            generation,
                            attempts: attempt,
                        });
                        vec![Effect::GaveUp {
                            generation,
                            attempts: attempt,
                        }]
                    }
                }
                EnsureOutcome::Failed { .. } => {
                    state.set_status(ReconcileStatus::Absent);
                    Vec::new()
                }
            }
        }
        Msg::MenuToggled => vec![Effect::ToggleMenu],
        Msg::OutsideClicked => vec![Effect::CloseMenu],
        Msg::FilterSelected { filter } => {
            vec![Effect::CloseMenu, Effect::ApplyFilter { filter }]
        }
    };

    (state, effects)
}
