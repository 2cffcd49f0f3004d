//! Business-rule validation for incoming offers.
//!
//! Rules are checked in a fixed order and the first failure wins:
//!
//! 1. restaurant id present and positive
//! 2. offer type is `FLATX` or `FLATPERCENT`
//! 3. offer value non-negative, and at most 100 for `FLATPERCENT`
//! 4. at least one non-empty customer segment

use std::collections::BTreeSet;

use super::error::ValidationError;
use crate::domain::{Offer, OfferRequest, OfferType, RestaurantId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_PERCENT: u64 = 100;

/// Turns an [`OfferRequest`] into an [`Offer`] or explains why it can't.
///
/// Pure and deterministic. Blank segment labels are dropped and repeated
/// labels collapse into one.
pub fn validate(request: &OfferRequest) -> ValidationResult<Offer> {
    let restaurant_id = validate_restaurant(request.restaurant_id)?;
    let offer_type = validate_offer_type(request.offer_type.as_deref())?;
    let offer_value = validate_offer_value(offer_type, request.offer_value)?;
    let customer_segments = validate_segments(request.customer_segments.as_deref())?;

    Ok(Offer::new(restaurant_id, offer_type, offer_value, customer_segments))
}

fn validate_restaurant(restaurant_id: Option<i64>) -> ValidationResult<RestaurantId> {
    restaurant_id
        .filter(|id| *id > 0)
        .and_then(|id| RestaurantId::try_from(id).ok())
        .ok_or(ValidationError::InvalidRestaurant(restaurant_id))
}

fn validate_offer_type(offer_type: Option<&str>) -> ValidationResult<OfferType> {
    offer_type
        .and_then(|label| label.parse().ok())
        .ok_or_else(|| ValidationError::UnknownOfferType(offer_type.map(str::to_string)))
}

fn validate_offer_value(offer_type: OfferType, value: i64) -> ValidationResult<u64> {
    let invalid = || ValidationError::InvalidOfferValue {
        offer_type: offer_type.to_string(),
        value,
    };
    let value = u64::try_from(value).map_err(|_| invalid())?;
    if offer_type == OfferType::FlatPercent && value > MAX_PERCENT {
        return Err(invalid());
    }
    Ok(value)
}

fn validate_segments(segments: Option<&[String]>) -> ValidationResult<BTreeSet<String>> {
    let segments: BTreeSet<String> = segments
        .unwrap_or_default()
        .iter()
        .filter(|segment| !segment.is_empty())
        .cloned()
        .collect();
    if segments.is_empty() {
        return Err(ValidationError::MissingSegments);
    }
    Ok(segments)
}
