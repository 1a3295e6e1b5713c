//! Domain models for the vet triage system.

mod appointment;
mod notification;
mod pet;
mod reminder;

pub use appointment::*;
pub use notification::*;
pub use pet::*;
pub use reminder::*;

use thiserror::Error;

/// A textual label that does not name any variant of the target enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownLabel {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
