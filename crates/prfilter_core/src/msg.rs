use crate::{EnsureOutcome, FilterState, PageSnapshot, TriggerSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Content script loaded on a page with the given URL.
    Started { url: String },
    /// A navigation signal fired; the page needs to be looked at again.
    Triggered { source: TriggerSource },
    /// Periodic URL poll.
    UrlPolled { url: String },
    /// Fresh page facts captured in response to a trigger.
    Observed {
        source: TriggerSource,
        page: PageSnapshot,
    },
    /// Settling delay scheduled under `generation` has elapsed.
    SettleElapsed { generation: u64 },
    /// Retry delay for a missing toolbar has elapsed.
    RetryElapsed { generation: u64, attempt: u32 },
    /// Result of an ensure-control pass.
    EnsureFinished {
        generation: u64,
        attempt: u32,
        outcome: EnsureOutcome,
    },
    /// User clicked the control's trigger button.
    MenuToggled,
    /// User clicked anywhere outside the control.
    OutsideClicked,
    /// User picked one of the filter options.
    FilterSelected { filter: FilterState },
    NoOp,
}
