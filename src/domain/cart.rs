use super::offer::{Offer, RestaurantId};

pub type CustomerId = u64;

/// A cart at checkout. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartCheckoutRequest {
    pub restaurant_id: RestaurantId,
    pub customer_id: CustomerId,
    pub cart_value: u64,
}

impl CartCheckoutRequest {
    pub fn new(restaurant_id: RestaurantId, customer_id: CustomerId, cart_value: u64) -> Self {
        Self {
            restaurant_id,
            customer_id,
            cart_value,
        }
    }
}

/// Outcome of applying (or not finding) an offer for a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedOfferResult {
    pub original_cart_value: u64,
    pub final_cart_value: u64,
    pub offer_applied: Option<Offer>,
}

impl AppliedOfferResult {
    /// Cart passes through unchanged.
    pub fn unchanged(cart_value: u64) -> Self {
        Self {
            original_cart_value: cart_value,
            final_cart_value: cart_value,
            offer_applied: None,
        }
    }

    pub fn with_offer(cart_value: u64, offer: Offer) -> Self {
        Self {
            original_cart_value: cart_value,
            final_cart_value: offer.discounted_value(cart_value),
            offer_applied: Some(offer),
        }
    }

    pub fn is_offer_applied(&self) -> bool {
        self.offer_applied.is_some()
    }

    pub fn discount(&self) -> u64 {
        self.original_cart_value - self.final_cart_value
    }
}
