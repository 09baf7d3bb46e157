use crate::{FilterState, ViewClassification, WatcherConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// No trigger sources installed yet.
    #[default]
    Idle,
    /// Trigger sources installed. There is no way back to `Idle`.
    Active,
}

/// Navigation signals the host page emits when it finishes a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationSignal {
    PopState,
    HashChange,
    TurboLoad,
    TurboRender,
    PjaxEnd,
}

impl NavigationSignal {
    pub const ALL: [NavigationSignal; 5] = [
        NavigationSignal::PopState,
        NavigationSignal::HashChange,
        NavigationSignal::TurboLoad,
        NavigationSignal::TurboRender,
        NavigationSignal::PjaxEnd,
    ];

    /// DOM event name of the signal.
    pub fn event_name(self) -> &'static str {
        match self {
            NavigationSignal::PopState => "popstate",
            NavigationSignal::HashChange => "hashchange",
            NavigationSignal::TurboLoad => "turbo:load",
            NavigationSignal::TurboRender => "turbo:render",
            NavigationSignal::PjaxEnd => "pjax:end",
        }
    }

    /// History signals fire on `window`, framework signals on `document`.
    pub fn fires_on_window(self) -> bool {
        matches!(self, NavigationSignal::PopState | NavigationSignal::HashChange)
    }
}

/// Where a re-evaluation request came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerSource {
    Startup,
    UrlPoll,
    Navigation(NavigationSignal),
    StructuralChange { container_id: String },
}

/// Result of one ensure-control pass against the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    Attached { filter: FilterState },
    ToolbarMissing,
    Failed { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileStatus {
    #[default]
    Absent,
    Pending { generation: u64, attempt: u32 },
    Attached { generation: u64 },
    GaveUp { generation: u64, attempts: u32 },
}

/// Process-wide watcher state. One value lives for the page's lifetime.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WatcherState {
    lifecycle: Lifecycle,
    last_known_url: String,
    generation: u64,
    status: ReconcileStatus,
    last_classification: Option<ViewClassification>,
    config: WatcherConfig,
}

impl WatcherState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WatcherConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Back to `Idle` with no history, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config.clone());
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn last_known_url(&self) -> &str {
        &self.last_known_url
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn status(&self) -> ReconcileStatus {
        self.status
    }

    pub fn control_attached(&self) -> bool {
        matches!(self.status, ReconcileStatus::Attached { .. })
    }

    pub fn last_classification(&self) -> Option<ViewClassification> {
        self.last_classification
    }

    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    pub(crate) fn activate(&mut self, url: String) {
        self.lifecycle = Lifecycle::Active;
        self.last_known_url = url;
    }

    /// Records a polled URL; returns whether it differs from the last one.
    pub(crate) fn observe_url(&mut self, url: String) -> bool {
        if self.last_known_url == url {
            return false;
        }
        self.last_known_url = url;
        true
    }

    pub(crate) fn next_generation(&mut self, classification: ViewClassification) -> u64 {
        self.generation += 1;
        self.last_classification = Some(classification);
        self.generation
    }

    pub(crate) fn set_status(&mut self, status: ReconcileStatus) {
        self.status = status;
    }
}
