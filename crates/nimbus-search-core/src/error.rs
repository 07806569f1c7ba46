//! Error types for addon search collaborators.

use std::error::Error;

use thiserror::Error;

/// Failure raised by an [`crate::AddonInvoker`] implementation when a search
/// request could not be handed to the addon.
///
/// The call protocol treats this the same as an addon that never answers:
/// the failure is logged and the call converges on the timeout path, so the
/// error never propagates past the searcher.
#[derive(Debug, Error)]
#[error("failed to dispatch search to addon {addon_id}")]
pub struct InvokeError {
    /// Addon the dispatch was aimed at.
    pub addon_id: String,
    /// Underlying transport failure.
    #[source]
    pub source: Box<dyn Error + Send + Sync>,
}

impl InvokeError {
    /// Wrap a transport failure for the given addon.
    pub fn new(addon_id: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        Self {
            addon_id: addon_id.into(),
            source: Box::new(source),
        }
    }
}
