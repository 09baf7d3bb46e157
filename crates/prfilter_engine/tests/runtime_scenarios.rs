use std::cell::{Cell, RefCell};
use std::time::Duration;

use pretty_assertions::assert_eq;
use prfilter_core::{
    decode_url, FilterState, Lifecycle, Msg, NavigationSignal, ReconcileStatus, RetryPolicy,
    TriggerSource, WatcherConfig,
};
use prfilter_engine::{HostDocument, MemoryDocument, Platform, Runtime};

const LIST_URL: &str = "https://github.com/octo/hello/issues?q=is%3Aopen";
const DETAIL_URL: &str = "https://github.com/octo/hello/issues/42";

/// Collects scheduled timers so tests decide when they fire.
#[derive(Default)]
struct ManualPlatform {
    timers: RefCell<Vec<(Duration, Msg)>>,
    installs: Cell<usize>,
}

impl ManualPlatform {
    fn take_timers(&self) -> Vec<(Duration, Msg)> {
        self.timers.borrow_mut().drain(..).collect()
    }
}

impl Platform for ManualPlatform {
    fn schedule(&self, delay: Duration, msg: Msg) {
        self.timers.borrow_mut().push((delay, msg));
    }

    fn install_trigger_sources(&self, _config: &WatcherConfig) -> usize {
        self.installs.set(self.installs.get() + 1);
        3
    }
}

type TestRuntime = Runtime<MemoryDocument, ManualPlatform>;

fn runtime(url: &str, config: WatcherConfig) -> TestRuntime {
    ext_logging::initialize_for_tests();
    Runtime::new(MemoryDocument::new(url), ManualPlatform::default(), config)
}

/// Fires every pending timer, including ones scheduled while firing.
fn fire_all(runtime: &mut TestRuntime) {
    loop {
        let timers = runtime.platform().take_timers();
        if timers.is_empty() {
            break;
        }
        for (_, msg) in timers {
            runtime.dispatch(msg);
        }
    }
}

fn trigger(runtime: &mut TestRuntime, signal: NavigationSignal) {
    runtime.dispatch(Msg::Triggered {
        source: TriggerSource::Navigation(signal),
    });
}

#[test]
fn start_on_list_shows_control_with_no_filter_selected() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.document().render_toolbar(true);

    rt.start();
    assert_eq!(rt.state().lifecycle(), Lifecycle::Active);
    assert_eq!(rt.document().control_count(), 0, "waits for the settle delay");

    let timers = rt.platform().take_timers();
    assert_eq!(timers.len(), 1);
    assert_eq!(timers[0].0, Duration::from_millis(500));
    for (_, msg) in timers {
        rt.dispatch(msg);
    }

    assert_eq!(rt.document().control_count(), 1);
    assert_eq!(
        rt.document().control_view().map(|view| view.selected),
        Some(FilterState::None)
    );
    assert_eq!(rt.state().status(), ReconcileStatus::Attached { generation: 1 });
}

#[test]
fn second_start_does_not_reinstall_sources() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.start();
    rt.start();
    assert_eq!(rt.platform().installs.get(), 1);
}

#[test]
fn selecting_with_pr_navigates_with_token_appended() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.document().render_toolbar(true);
    rt.start();
    fire_all(&mut rt);

    rt.dispatch(Msg::MenuToggled);
    assert!(rt.document().control_menu_open());

    rt.dispatch(Msg::FilterSelected {
        filter: FilterState::WithLink,
    });

    assert!(!rt.document().control_menu_open());
    let navigations = rt.document().navigations();
    assert_eq!(
        navigations,
        vec!["https://github.com/octo/hello/issues?q=is%3Aopen+linked%3Apr".to_string()]
    );
    assert_eq!(decode_url(&navigations[0]), FilterState::WithLink);
}

#[test]
fn switching_from_with_to_without_pr() {
    let mut rt = runtime(
        "https://github.com/octo/hello/issues?q=is%3Aopen+linked%3Apr",
        WatcherConfig::default(),
    );
    rt.document().render_toolbar(true);
    rt.start();
    fire_all(&mut rt);
    assert_eq!(
        rt.document().control_view().map(|view| view.selected),
        Some(FilterState::WithLink)
    );

    rt.dispatch(Msg::FilterSelected {
        filter: FilterState::WithoutLink,
    });

    assert_eq!(
        rt.document().current_url(),
        "https://github.com/octo/hello/issues?q=is%3Aopen+-linked%3Apr"
    );
}

#[test]
fn leaving_for_detail_view_removes_the_control() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.document().render_toolbar(true);
    rt.start();
    fire_all(&mut rt);
    assert_eq!(rt.document().control_count(), 1);

    rt.document().set_url(DETAIL_URL);
    rt.poll();

    assert_eq!(rt.document().control_count(), 0);
    assert_eq!(rt.state().last_known_url(), DETAIL_URL);
    assert_eq!(rt.state().status(), ReconcileStatus::Absent);
}

#[test]
fn burst_of_triggers_leaves_exactly_one_control() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.document().render_toolbar(true);
    rt.start();
    for signal in NavigationSignal::ALL {
        trigger(&mut rt, signal);
    }
    rt.dispatch(Msg::Triggered {
        source: TriggerSource::StructuralChange {
            container_id: "repo-content-turbo-frame".into(),
        },
    });
    assert_eq!(rt.platform().timers.borrow().len(), 7);

    fire_all(&mut rt);

    assert_eq!(rt.document().control_count(), 1);
}

#[test]
fn ensure_after_every_settle_never_duplicates() {
    // Fire each settle as soon as it is scheduled, interleaved with triggers.
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.document().render_toolbar(true);
    rt.start();
    for signal in NavigationSignal::ALL {
        fire_all(&mut rt);
        trigger(&mut rt, signal);
        assert!(rt.document().control_count() <= 1);
    }
    fire_all(&mut rt);
    assert_eq!(rt.document().control_count(), 1);
}

#[test]
fn stale_settle_cannot_reintroduce_a_removed_control() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.document().render_toolbar(true);
    rt.start();
    let pending = rt.platform().take_timers();

    rt.document().set_url(DETAIL_URL);
    trigger(&mut rt, NavigationSignal::TurboLoad);
    for (_, msg) in pending {
        rt.dispatch(msg);
    }

    assert_eq!(rt.document().control_count(), 0);
}

#[test]
fn host_re_render_is_recovered_by_structural_change() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.document().render_toolbar(true);
    rt.start();
    fire_all(&mut rt);

    rt.document().tear_down_toolbar();
    assert_eq!(rt.document().control_count(), 0);
    rt.document().render_toolbar(true);
    rt.dispatch(Msg::Triggered {
        source: TriggerSource::StructuralChange {
            container_id: "repo-content-pjax-container".into(),
        },
    });
    fire_all(&mut rt);

    assert_eq!(rt.document().control_count(), 1);
}

#[test]
fn late_toolbar_is_picked_up_by_retry() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.start();
    for (_, msg) in rt.platform().take_timers() {
        rt.dispatch(msg);
    }
    assert_eq!(
        rt.state().status(),
        ReconcileStatus::Pending {
            generation: 1,
            attempt: 2
        }
    );

    rt.document().render_toolbar(false);
    fire_all(&mut rt);

    assert_eq!(rt.document().control_count(), 1);
}

#[test]
fn retry_gives_up_after_the_bound() {
    let config = WatcherConfig {
        retry: RetryPolicy {
            max_attempts: 4,
            ..RetryPolicy::default()
        },
        ..WatcherConfig::default()
    };
    let mut rt = runtime(LIST_URL, config);
    rt.start();

    fire_all(&mut rt);

    assert_eq!(
        rt.state().status(),
        ReconcileStatus::GaveUp {
            generation: 1,
            attempts: 4
        }
    );
    assert!(rt.platform().take_timers().is_empty());
    assert_eq!(rt.document().control_count(), 0);
}

#[test]
fn dom_only_signals_classify_the_page() {
    let mut rt = runtime("https://github.com/octo/hello", WatcherConfig::default());
    rt.document().render_toolbar(true);
    rt.start();
    fire_all(&mut rt);
    assert_eq!(rt.document().control_count(), 0);

    rt.document().set_issues_frame(true);
    trigger(&mut rt, NavigationSignal::TurboRender);
    fire_all(&mut rt);
    assert_eq!(rt.document().control_count(), 1);
}

#[test]
fn refresh_runs_before_rebuild_when_url_changes_in_place() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.document().render_toolbar(true);
    rt.start();
    fire_all(&mut rt);

    rt.document()
        .set_url("https://github.com/octo/hello/issues?q=is%3Aopen+linked%3Apr");
    rt.poll();

    // Visuals follow the URL before the settled rebuild fires.
    assert_eq!(
        rt.document().control_view().map(|view| view.selected),
        Some(FilterState::WithLink)
    );
    fire_all(&mut rt);
    assert_eq!(rt.document().control_count(), 1);
}

#[test]
fn failed_attach_does_not_stop_later_triggers() {
    let mut rt = runtime(LIST_URL, WatcherConfig::default());
    rt.document().render_toolbar(true);
    rt.document().fail_inserts(true);
    rt.start();
    fire_all(&mut rt);
    assert_eq!(rt.document().control_count(), 0);
    assert_eq!(rt.state().status(), ReconcileStatus::Absent);

    rt.document().fail_inserts(false);
    trigger(&mut rt, NavigationSignal::PopState);
    fire_all(&mut rt);
    assert_eq!(rt.document().control_count(), 1);
}
