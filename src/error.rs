//! Errors returned by translation table operations.

use thiserror::Error;

/// Failures of [`TranslationTable`](crate::TranslationTable) operations.
///
/// Every failure is synchronous and leaves the table usable. A failed `load`
/// never changes the loaded entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Malformed option or setter argument (wrong type or unknown name).
    #[error("{0}")]
    InvalidConfig(String),

    /// A format discriminator was required but not given.
    #[error("format parameter is required")]
    MissingFormat,

    /// The format discriminator names an unknown format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An argument has the wrong shape.
    #[error("{0}")]
    InvalidInput(String),

    /// A payload was parsed but is not a valid translations object.
    ///
    /// Parser specific details are dropped.
    #[error("{0}")]
    InvalidData(String),

    /// A replacement name does not match `^[a-zA-Z0-9_]+$`.
    #[error(
        "replace parameter key '{key}' not matching regular expression {}",
        crate::interpolate::REPLACEMENT_KEY_PATTERN
    )]
    InvalidReplacementKey {
        /// The offending replacement name
        key: String,
    },
}

impl TableError {
    /// Shorthand for [`TableError::InvalidConfig`].
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Shorthand for [`TableError::InvalidInput`].
    pub(crate) fn input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
