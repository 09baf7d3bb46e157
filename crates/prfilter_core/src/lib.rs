//! PR filter core: pure watcher state machine, page classification and the
//! search-query encoder. Nothing in here touches the DOM.
mod classify;
mod config;
mod effect;
mod msg;
mod mutation;
mod query;
mod state;
mod update;
mod view_model;

pub use classify::{
    classify, is_issues_list_path, is_target_view, PageSnapshot, Signal, ViewClassification,
};
pub use config::{RetryPolicy, WatcherConfig};
pub use effect::Effect;
pub use msg::Msg;
pub use mutation::{
    first_structural_change, is_structural_change, MutationKind, MutationView,
    NAVIGATION_CONTAINER_IDS,
};
pub use query::{
    decode, decode_url, encode, with_filter, FilterState, QueryError, LINKED_TOKEN,
    NOT_LINKED_TOKEN, SEARCH_PARAM,
};
pub use state::{
    EnsureOutcome, Lifecycle, NavigationSignal, ReconcileStatus, TriggerSource, WatcherState,
};
pub use update::update;
pub use view_model::{ControlView, Emphasis};
