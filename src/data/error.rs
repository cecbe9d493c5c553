use thiserror::Error;

/// Failures of a single display action. None of them are fatal: the action is
/// aborted and the message is shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A selector token is not an integer or an `INT-INT` range.
    #[error("Invalid period '{token}': {reason}")]
    Parse { token: String, reason: String },

    /// The selection matched zero rows of the loaded table.
    #[error("No data available for the {selector}")]
    NoData { selector: String },

    /// A display action ran before any table was loaded.
    #[error("Please select a data file first.")]
    NoTable,
}

impl SelectionError {
    pub(crate) fn parse(token: &str, reason: impl Into<String>) -> Self {
        SelectionError::Parse {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
