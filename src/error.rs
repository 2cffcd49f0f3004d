use thiserror::Error;

use crate::domain::CustomerId;
use crate::offer_actor::{RegistryError, ValidationError};
use crate::segment_actor::LookupError;

/// Outcome of a rejected create-offer call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreateOfferError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors that can occur while applying an offer to a cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Segment unresolved for customer {customer_id}: {reason}")]
    SegmentUnresolved {
        customer_id: CustomerId,
        reason: String,
    },
}

impl ResolveError {
    pub fn unresolved(customer_id: CustomerId, error: &LookupError) -> Self {
        ResolveError::SegmentUnresolved {
            customer_id,
            reason: error.to_string(),
        }
    }
}
