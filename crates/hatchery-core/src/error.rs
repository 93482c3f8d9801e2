//! Error taxonomy for registry, breeding and care operations

use hatchery_genetics::ColorFormatError;
use thiserror::Error;

use crate::pet::{OwnerId, PetId};

/// Every failure is terminal to the requested operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PetError {
    /// Numeric trait outside its documented bounds (never clamped on input)
    #[error("{field} = {value} is outside [{min}, {max}]")]
    Validation {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("pet {0} not found")]
    NotFound(PetId),

    #[error("{caller} does not own pet {pet}")]
    NotAuthorized { pet: PetId, caller: OwnerId },

    /// Same-gender pair, or one pet used as both parents
    #[error("incompatible breeding: {0}")]
    IncompatibleBreeding(String),

    #[error(transparent)]
    Format(#[from] ColorFormatError),

    /// Offspring was stored but could not be linked to one of its parents
    #[error("offspring {offspring} stored but not linked to parent {parent}: {reason}")]
    PartialBreeding {
        offspring: PetId,
        parent: PetId,
        reason: String,
    },

    /// Backing store failed (I/O, serialization, poisoned lock)
    #[error("store failure: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, PetError>;

impl PetError {
    pub(crate) fn out_of_bounds(
        field: &'static str,
        value: impl Into<i64>,
        min: i64,
        max: i64,
    ) -> Self {
        Self::Validation {
            field,
            value: value.into(),
            min,
            max,
        }
    }
}
