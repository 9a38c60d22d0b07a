//! Domain errors for the history context.

use thiserror::Error;

/// Raised when a stored action string is not a known [`super::HistoryAction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown history action: {0}")]
pub struct ParseHistoryActionError(pub String);
