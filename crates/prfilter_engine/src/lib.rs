//! PR filter engine: reconciles the injected control with the host document
//! and executes the effects produced by `prfilter_core::update`.
mod document;
mod error;
pub mod memory;
mod reconciler;
mod runtime;
pub mod selectors;

pub use document::{HostDocument, Platform};
pub use error::DomError;
pub use memory::MemoryDocument;
pub use reconciler::Reconciler;
pub use runtime::Runtime;
