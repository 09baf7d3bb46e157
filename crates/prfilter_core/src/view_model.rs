use crate::FilterState;

/// Visual emphasis of the trigger button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Neutral,
    Success,
    Danger,
}

impl Emphasis {
    /// Inline `(background-color, color)` for the trigger button; `None`
    /// restores the host's own styling.
    pub fn button_colors(self) -> Option<(&'static str, &'static str)> {
        match self {
            Emphasis::Neutral => None,
            Emphasis::Success => Some((
                "var(--color-success-subtle, rgba(31, 136, 61, 0.15))",
                "var(--color-success-fg, #2da44e)",
            )),
            Emphasis::Danger => Some((
                "var(--color-danger-subtle, rgba(207, 34, 46, 0.15))",
                "var(--color-danger-fg, #cf222e)",
            )),
        }
    }
}

/// What the injected control should display for a given filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub selected: FilterState,
    pub emphasis: Emphasis,
    pub title: &'static str,
}

impl ControlView {
    pub fn for_filter(selected: FilterState) -> Self {
        let (emphasis, title) = match selected {
            FilterState::None => (Emphasis::Neutral, "Filter by PR status"),
            FilterState::WithLink => (Emphasis::Success, "Showing issues with PRs"),
            FilterState::WithoutLink => (Emphasis::Danger, "Showing issues without PRs"),
        };
        Self {
            selected,
            emphasis,
            title,
        }
    }

    /// Whether the option for `filter` carries the check marker.
    pub fn is_checked(&self, filter: FilterState) -> bool {
        self.selected == filter
    }
}
