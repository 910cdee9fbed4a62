//! Resolution outcomes.

use serde::Serialize;

use crate::error::ZilnamesError;

/// Outcome of one forward, reverse, or avatar lookup.
///
/// `NotFound` is the ordinary "no record set" answer from a successful read
/// and is never reported as a failure. `Unsupported` is the disabled state
/// for chain ids outside the network table: no read was attempted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<T> {
    /// A record exists.
    Found(T),
    /// The read succeeded but no record is set.
    NotFound,
    /// The chain id is not a supported network.
    Unsupported(u64),
    /// Validation or contract-call failure.
    Failed(ZilnamesError),
}

/// Wire-level label of a [`Resolution`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// See [`Resolution::Found`]
    Found,
    /// See [`Resolution::NotFound`]
    NotFound,
    /// See [`Resolution::Unsupported`]
    Unsupported,
    /// See [`Resolution::Failed`]
    Failed,
}

impl<T> Resolution<T> {
    /// Builds a resolution from an optional record.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Resolution::Found(v),
            None => Resolution::NotFound,
        }
    }

    /// Wire-level status.
    pub fn status(&self) -> ResolutionStatus {
        match self {
            Resolution::Found(_) => ResolutionStatus::Found,
            Resolution::NotFound => ResolutionStatus::NotFound,
            Resolution::Unsupported(_) => ResolutionStatus::Unsupported,
            Resolution::Failed(_) => ResolutionStatus::Failed,
        }
    }

    /// Returns true for `Found`.
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// Returns true for `Failed`.
    pub fn is_failed(&self) -> bool {
        matches!(self, Resolution::Failed(_))
    }

    /// The record, if found.
    pub fn value(&self) -> Option<&T> {
        match self {
            Resolution::Found(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the resolution, returning the record if found.
    pub fn into_value(self) -> Option<T> {
        match self {
            Resolution::Found(v) => Some(v),
            _ => None,
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&ZilnamesError> {
        match self {
            Resolution::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Maps the found value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Found(v) => Resolution::Found(f(v)),
            Resolution::NotFound => Resolution::NotFound,
            Resolution::Unsupported(id) => Resolution::Unsupported(id),
            Resolution::Failed(e) => Resolution::Failed(e),
        }
    }

    /// User-facing one-liner that never words `NotFound` as a failure.
    pub fn describe(&self) -> String
    where
        T: std::fmt::Display,
    {
        match self {
            Resolution::Found(v) => v.to_string(),
            Resolution::NotFound => "no record set".into(),
            Resolution::Unsupported(id) => format!("chain {id} is not supported"),
            Resolution::Failed(e) => format!("lookup failed: {e}"),
        }
    }
}

impl<T> From<ZilnamesError> for Resolution<T> {
    /// Unsupported networks stay a clean disabled state, everything else fails.
    fn from(err: ZilnamesError) -> Self {
        match err {
            ZilnamesError::UnsupportedNetwork(id) => Resolution::Unsupported(id),
            other => Resolution::Failed(other),
        }
    }
}
