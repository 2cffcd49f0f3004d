use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::{OfferKey, RestaurantId};

/// Why an offer failed validation. The first broken rule wins.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid restaurant id: {0:?}")]
    InvalidRestaurant(Option<i64>),
    #[error("Unknown offer type: {0:?}")]
    UnknownOfferType(Option<String>),
    #[error("Invalid offer value {value} for {offer_type}")]
    InvalidOfferValue { offer_type: String, value: i64 },
    #[error("At least one customer segment is required")]
    MissingSegments,
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Offer already exists for restaurant {restaurant_id} and segment {segment}")]
    DuplicateOffer {
        restaurant_id: RestaurantId,
        segment: String,
    },
    #[error("Offer registry unavailable: {0}")]
    RegistryUnavailable(String),
}

impl From<FrameworkError<OfferKey>> for RegistryError {
    fn from(error: FrameworkError<OfferKey>) -> Self {
        match error {
            FrameworkError::Conflict(key) => RegistryError::DuplicateOffer {
                restaurant_id: key.restaurant_id,
                segment: key.segment,
            },
            other => RegistryError::RegistryUnavailable(other.to_string()),
        }
    }
}
