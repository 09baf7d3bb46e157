use std::time::Duration;

use prfilter_core::{ControlView, Msg, PageSnapshot, WatcherConfig};

use crate::selectors::{ISSUES_FRAME_SELECTOR, LIST_CONTAINER_SELECTOR, TOOLBAR_SELECTOR};
use crate::DomError;

/// The slice of the host page the reconciler reads and writes.
///
/// All methods take `&self`: the page is a single shared document mutated from
/// one event loop, and implementations use interior mutability where needed.
pub trait HostDocument {
    type Node: Clone;

    /// Full URL of the page as it is right now.
    fn current_url(&self) -> String;
    fn path(&self) -> String;

    fn query(&self, selector: &str) -> Result<Option<Self::Node>, DomError>;
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>, DomError>;
    fn query_in(&self, parent: &Self::Node, selector: &str)
        -> Result<Option<Self::Node>, DomError>;

    fn remove(&self, node: &Self::Node) -> Result<(), DomError>;
    /// Inserts `child` as the first child of `parent`.
    fn prepend(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Builds a detached control instance. Clicks on it reach the runtime once
    /// it is attached.
    fn create_control(&self) -> Result<Self::Node, DomError>;
    /// Adds the control's stylesheet unless the document already has it.
    fn ensure_stylesheet(&self) -> Result<(), DomError>;
    fn apply_view(&self, control: &Self::Node, view: &ControlView) -> Result<(), DomError>;
    fn menu_open(&self, control: &Self::Node) -> bool;
    fn set_menu_open(&self, control: &Self::Node, open: bool) -> Result<(), DomError>;

    /// Full URL assignment; the host performs a page transition.
    fn navigate(&self, url: &str) -> Result<(), DomError>;

    fn exists(&self, selector: &str) -> bool {
        matches!(self.query(selector), Ok(Some(_)))
    }

    /// Captures the classifier's inputs as they are at call time.
    fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            path: self.path(),
            has_list_container: self.exists(LIST_CONTAINER_SELECTOR),
            has_toolbar: self.exists(TOOLBAR_SELECTOR),
            has_issues_frame: self.exists(ISSUES_FRAME_SELECTOR),
        }
    }
}

/// Timers and trigger-source wiring provided by the environment.
pub trait Platform {
    /// Delivers `msg` back to the runtime after `delay`.
    fn schedule(&self, delay: Duration, msg: Msg);

    /// Installs the trigger sources and returns how many came up. A source
    /// that cannot be installed is skipped.
    fn install_trigger_sources(&self, config: &WatcherConfig) -> usize;
}
