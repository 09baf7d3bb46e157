/// Read-only facts about the page, captured fresh for every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSnapshot {
    /// `location.pathname` of the page.
    pub path: String,
    /// The issues list container is rendered.
    pub has_list_container: bool,
    /// An element with `role="toolbar"` is rendered.
    pub has_toolbar: bool,
    /// A frame whose `src` references the issues list is rendered.
    pub has_issues_frame: bool,
}

impl PageSnapshot {
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// The signal that identified the target view, in diagnostic precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    UrlPattern,
    ListContainer,
    IssuesFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewClassification {
    pub is_target_view: bool,
    pub signal: Option<Signal>,
}

/// Decides whether the snapshot shows the issues list.
///
/// Any single signal is enough. A spurious control is harmless, a missing one
/// is not, so the signals are OR-ed rather than cross-checked.
pub fn classify(page: &PageSnapshot) -> ViewClassification {
    let signal = if is_issues_list_path(&page.path) {
        Some(Signal::UrlPattern)
    } else if page.has_list_container && page.has_toolbar {
        Some(Signal::ListContainer)
    } else if page.has_issues_frame {
        Some(Signal::IssuesFrame)
    } else {
        None
    };
    ViewClassification {
        is_target_view: signal.is_some(),
        signal,
    }
}

pub fn is_target_view(page: &PageSnapshot) -> bool {
    classify(page).is_target_view
}

/// Matches `/{owner}/{repo}/issues` (trailing slash allowed) anywhere in the
/// path, rejecting `/{owner}/{repo}/issues/{id}` detail views and sub-pages
/// such as `/issues/labels`.
pub fn is_issues_list_path(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();
    segments.iter().enumerate().any(|(index, segment)| {
        if *segment != "issues" || index < 3 {
            return false;
        }
        let owner = segments[index - 2];
        let repo = segments[index - 1];
        if owner.is_empty() || repo.is_empty() {
            return false;
        }
        match segments.get(index + 1) {
            None => true,
            Some(next) => !is_item_segment(next),
        }
    })
}

/// An identifier segment: digits, or a word made of letters, digits and `_`.
fn is_item_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
