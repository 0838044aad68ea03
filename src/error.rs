//! Error type of the crate.

use thiserror::Error;

/// Errors returned by catalog lookups and argument validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A palette name, or a ramp length of a palette, is not in the
    /// catalog.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// The argument `name` has a value outside its domain, e.g. a
    /// negative count or a malformed color.
    #[error("invalid argument: {name} = {value} ({reason})")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Error {
    pub(crate) fn unknown_palette(name: &str) -> Self {
        Error::NotFound { what: format!("palette “{name}”") }
    }

    pub(crate) fn invalid(name: &'static str, value: impl ToString,
                          reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
