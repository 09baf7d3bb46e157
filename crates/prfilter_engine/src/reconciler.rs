use ext_logging::{ext_debug, ext_info, ext_warn};
use prfilter_core::{decode_url, with_filter, ControlView, EnsureOutcome, FilterState};

use crate::selectors::{CONTROL_SELECTOR, TOOLBAR_ITEMS_SELECTOR, TOOLBAR_SELECTOR};
use crate::{DomError, HostDocument};

/// Owns the injected control: at most one instance lives in the document, and
/// its visuals follow the filter encoded in the current URL.
pub struct Reconciler<D> {
    doc: D,
}

impl<D: HostDocument> Reconciler<D> {
    pub fn new(doc: D) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Replaces whatever control instances exist with one fresh instance.
    ///
    /// Never fails: a document error is logged, any half-attached instance is
    /// cleaned up, and the outcome reports the control as absent.
    pub fn ensure_control(&self) -> EnsureOutcome {
        match self.try_ensure_control() {
            Ok(outcome) => outcome,
            Err(err) => {
                ext_warn!("Failed to add PR filter control: {}", err);
                if let Err(cleanup) = self.remove_control() {
                    ext_warn!("Cleanup after failed attach also failed: {}", cleanup);
                }
                EnsureOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn try_ensure_control(&self) -> Result<EnsureOutcome, DomError> {
        self.remove_control()?;

        let Some(toolbar) = self.doc.query(TOOLBAR_SELECTOR)? else {
            ext_debug!("Toolbar not rendered yet");
            return Ok(EnsureOutcome::ToolbarMissing);
        };

        self.doc.ensure_stylesheet()?;
        let control = self.doc.create_control()?;
        let parent = self
            .doc
            .query_in(&toolbar, TOOLBAR_ITEMS_SELECTOR)?
            .unwrap_or(toolbar);
        self.doc.prepend(&parent, &control)?;

        let filter = self.apply_current_filter(&control)?;
        ext_info!("PR filter control attached (filter={})", filter);
        Ok(EnsureOutcome::Attached { filter })
    }

    /// Removes every control instance; returns how many were removed.
    pub fn remove_control(&self) -> Result<usize, DomError> {
        let existing = self.doc.query_all(CONTROL_SELECTOR)?;
        for control in &existing {
            self.doc.remove(control)?;
        }
        if !existing.is_empty() {
            ext_debug!("Removed {} existing filter control(s)", existing.len());
        }
        Ok(existing.len())
    }

    /// Re-reads the URL and updates the live control. Returns the filter now
    /// shown, or `None` when there is no control.
    pub fn refresh_visual_state(&self) -> Result<Option<FilterState>, DomError> {
        match self.doc.query(CONTROL_SELECTOR)? {
            Some(control) => self.apply_current_filter(&control).map(Some),
            None => Ok(None),
        }
    }

    pub fn toggle_menu(&self) -> Result<(), DomError> {
        if let Some(control) = self.doc.query(CONTROL_SELECTOR)? {
            let open = self.doc.menu_open(&control);
            self.doc.set_menu_open(&control, !open)?;
        }
        Ok(())
    }

    pub fn close_menu(&self) -> Result<(), DomError> {
        if let Some(control) = self.doc.query(CONTROL_SELECTOR)? {
            if self.doc.menu_open(&control) {
                self.doc.set_menu_open(&control, false)?;
            }
        }
        Ok(())
    }

    /// Navigates to the current URL rewritten for `filter`; returns the target.
    pub fn apply_filter(&self, filter: FilterState) -> Result<String, DomError> {
        let target = with_filter(&self.doc.current_url(), filter)?;
        ext_info!("Applying filter {} -> {}", filter, target);
        self.doc.navigate(&target)?;
        Ok(target)
    }

    fn apply_current_filter(&self, control: &D::Node) -> Result<FilterState, DomError> {
        let filter = decode_url(&self.doc.current_url());
        self.doc.apply_view(control, &ControlView::for_filter(filter))?;
        Ok(filter)
    }
}
