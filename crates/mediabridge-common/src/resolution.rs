//! Outcome of a metadata lookup.
//!
//! Every lookup in mediabridge either finds something or it does not. A
//! missing record, a provider that does not know the URL and a remote service
//! that timed out all look the same to the caller, so they share the
//! [`Resolution::NotFound`] variant. The [`Miss`] it carries records why, for
//! logging only.

use std::fmt;

/// Why a lookup produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss {
    /// The caller supplied nothing usable (empty URL, non-numeric id).
    InvalidInput(String),
    /// The record or provider does not exist.
    Absent(String),
    /// A remote service could not be reached or answered with an error.
    Transport(String),
    /// A remote service answered with a payload that could not be understood.
    Malformed(String),
}

impl Miss {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn absent<S: Into<String>>(msg: S) -> Self {
        Self::Absent(msg.into())
    }

    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::Malformed(msg.into())
    }
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Absent(msg) => write!(f, "absent: {msg}"),
            Self::Transport(msg) => write!(f, "transport failure: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed payload: {msg}"),
        }
    }
}

/// Result of a lookup that can only succeed or come up empty.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Resolution<T> {
    Found(T),
    NotFound(Miss),
}

impl<T> Resolution<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolution<U> {
        match self {
            Self::Found(value) => Resolution::Found(f(value)),
            Self::NotFound(miss) => Resolution::NotFound(miss),
        }
    }

    /// Discard the miss reason.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound(_) => None,
        }
    }

    /// Discard the miss reason after logging it under `context`.
    pub fn into_logged_option(self, context: &str) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound(miss) => {
                tracing::debug!(%miss, "{context}: nothing found");
                None
            }
        }
    }
}
