use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use prfilter_core::{Msg, WatcherConfig};
use prfilter_engine::Runtime;
use web_sys::{Document, Window};

use super::document::BrowserDocument;
use super::triggers::BrowserPlatform;

/// Single entry point for every browser callback.
///
/// Callbacks can fire while the runtime is busy (a synchronous DOM event
/// raised by one of our own mutations, for instance). Such messages wait in
/// `pending` and are drained by the call that holds the runtime.
pub(crate) struct Dispatcher {
    runtime: RefCell<Runtime<BrowserDocument, BrowserPlatform>>,
    pending: RefCell<VecDeque<Msg>>,
}

impl Dispatcher {
    pub(crate) fn new(window: Window, document: Document, config: WatcherConfig) -> Rc<Self> {
        Rc::new_cyclic(|handle: &Weak<Dispatcher>| {
            let doc = BrowserDocument::new(window.clone(), document.clone(), handle.clone());
            let platform = BrowserPlatform::new(window, document, handle.clone());
            Self {
                runtime: RefCell::new(Runtime::new(doc, platform, config)),
                pending: RefCell::new(VecDeque::new()),
            }
        })
    }

    pub(crate) fn send(&self, msg: Msg) {
        self.pending.borrow_mut().push_back(msg);
        self.drain();
    }

    fn drain(&self) {
        loop {
            let Ok(mut runtime) = self.runtime.try_borrow_mut() else {
                return;
            };
            let Some(msg) = self.pending.borrow_mut().pop_front() else {
                return;
            };
            runtime.dispatch(msg);
        }
    }
}

/// Delivers `msg` if the dispatcher is still alive.
pub(crate) fn send(handle: &Weak<Dispatcher>, msg: Msg) {
    if let Some(dispatcher) = handle.upgrade() {
        dispatcher.send(msg);
    }
}
