use prfilter_core::QueryError;
use thiserror::Error;

/// Failure while reading or mutating the host document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("selector {selector:?} failed: {message}")]
    Selector { selector: String, message: String },
    #[error("failed to create {what}: {message}")]
    Create { what: &'static str, message: String },
    #[error("failed to insert control: {0}")]
    Insert(String),
    #[error("failed to remove element: {0}")]
    Remove(String),
    #[error("failed to style control: {0}")]
    Style(String),
    #[error("navigation to {url} failed: {message}")]
    Navigate { url: String, message: String },
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl DomError {
    pub fn selector(selector: &str, message: impl Into<String>) -> Self {
        DomError::Selector {
            selector: selector.to_string(),
            message: message.into(),
        }
    }
}
