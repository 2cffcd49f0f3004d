use thiserror::Error;

use crate::domain::CustomerId;

/// Errors that can occur while resolving a customer's segment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown customer: {0}")]
    UnknownCustomer(CustomerId),
    #[error("Invalid segment label for customer {0}")]
    InvalidSegment(CustomerId),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
