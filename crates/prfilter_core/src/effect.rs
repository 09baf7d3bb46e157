use std::time::Duration;

use crate::{FilterState, TriggerSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Install every trigger source. Emitted once per page lifetime.
    InstallWatchers,
    /// Capture a page snapshot and feed it back as `Msg::Observed`.
    Observe { source: TriggerSource },
    /// Wait for the host's own render pass, then send `Msg::SettleElapsed`.
    ScheduleSettle { generation: u64, delay: Duration },
    EnsureControl { generation: u64, attempt: u32 },
    ScheduleRetry {
        generation: u64,
        attempt: u32,
        delay: Duration,
    },
    RemoveControl,
    RefreshVisual,
    ToggleMenu,
    CloseMenu,
    /// Rewrite the current URL for `filter` and navigate to it.
    ApplyFilter { filter: FilterState },
    /// The toolbar never appeared; no control for this generation.
    GaveUp { generation: u64, attempts: u32 },
}
