use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Restaurants are identified by a positive integer.
pub type RestaurantId = u64;

/// The kind of discount an offer grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferType {
    /// Subtracts a fixed amount from the cart value (`FLATX`).
    FlatAmount,
    /// Subtracts a percentage of the cart value, floored (`FLATPERCENT`).
    FlatPercent,
}

impl OfferType {
    pub const FLAT_AMOUNT_LABEL: &'static str = "FLATX";
    pub const FLAT_PERCENT_LABEL: &'static str = "FLATPERCENT";

    pub fn label(&self) -> &'static str {
        match self {
            OfferType::FlatAmount => Self::FLAT_AMOUNT_LABEL,
            OfferType::FlatPercent => Self::FLAT_PERCENT_LABEL,
        }
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OfferType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::FLAT_AMOUNT_LABEL => Ok(OfferType::FlatAmount),
            Self::FLAT_PERCENT_LABEL => Ok(OfferType::FlatPercent),
            other => Err(other.to_string()),
        }
    }
}

/// Unvalidated create-offer input, shaped like the transport payload.
///
/// Every field that a caller may leave out is optional here; the validator
/// decides what is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferRequest {
    pub restaurant_id: Option<i64>,
    pub offer_type: Option<String>,
    pub offer_value: i64,
    pub customer_segments: Option<Vec<String>>,
}

impl OfferRequest {
    pub fn new(
        restaurant_id: i64,
        offer_type: impl Into<String>,
        offer_value: i64,
        customer_segments: Vec<String>,
    ) -> Self {
        Self {
            restaurant_id: Some(restaurant_id),
            offer_type: Some(offer_type.into()),
            offer_value,
            customer_segments: Some(customer_segments),
        }
    }

    #[allow(dead_code)]
    pub fn with_restaurant_id(mut self, restaurant_id: Option<i64>) -> Self {
        self.restaurant_id = restaurant_id;
        self
    }

    #[allow(dead_code)]
    pub fn with_segments(mut self, customer_segments: Option<Vec<String>>) -> Self {
        self.customer_segments = customer_segments;
        self
    }
}

/// Uniqueness key of the registry: one active offer per restaurant and segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OfferKey {
    pub restaurant_id: RestaurantId,
    pub segment: String,
}

impl OfferKey {
    pub fn new(restaurant_id: RestaurantId, segment: impl Into<String>) -> Self {
        Self {
            restaurant_id,
            segment: segment.into(),
        }
    }
}

impl fmt::Display for OfferKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "restaurant {} / segment {}", self.restaurant_id, self.segment)
    }
}

/// A validated offer.
///
/// Only [`crate::offer_actor::validate`] builds one, so every `Offer` in the
/// registry satisfies the business rules. Offers are never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    restaurant_id: RestaurantId,
    offer_type: OfferType,
    offer_value: u64,
    customer_segments: BTreeSet<String>,
}

impl Offer {
    pub(crate) fn new(
        restaurant_id: RestaurantId,
        offer_type: OfferType,
        offer_value: u64,
        customer_segments: BTreeSet<String>,
    ) -> Self {
        Self {
            restaurant_id,
            offer_type,
            offer_value,
            customer_segments,
        }
    }

    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    pub fn offer_type(&self) -> OfferType {
        self.offer_type
    }

    pub fn offer_value(&self) -> u64 {
        self.offer_value
    }

    pub fn customer_segments(&self) -> &BTreeSet<String> {
        &self.customer_segments
    }

    /// Registry keys claimed by this offer, in sorted order.
    pub fn keys(&self) -> Vec<OfferKey> {
        self.customer_segments
            .iter()
            .map(|segment| OfferKey::new(self.restaurant_id, segment.as_str()))
            .collect()
    }

    /// Cart value after this offer is applied. Never negative, never rounds a
    /// percentage discount up.
    pub fn discounted_value(&self, cart_value: u64) -> u64 {
        match self.offer_type {
            OfferType::FlatAmount => cart_value.saturating_sub(self.offer_value),
            OfferType::FlatPercent => {
                let discount = u128::from(cart_value) * u128::from(self.offer_value) / 100;
                // offer_value <= 100 keeps discount <= cart_value
                let discount = u64::try_from(discount).unwrap_or(cart_value);
                cart_value.saturating_sub(discount)
            }
        }
    }
}
