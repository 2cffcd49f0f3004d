use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::clients::{OfferClient, SegmentClient};
use crate::domain::{AppliedOfferResult, CartCheckoutRequest};
use crate::error::ResolveError;
use crate::segment_actor::LookupError;

/// Picks the offer for a checkout and computes the discounted cart value.
///
/// Only reads the registry. A failed or slow segment lookup never guesses a
/// default segment; it surfaces as [`ResolveError::SegmentUnresolved`].
#[derive(Clone)]
pub struct OfferResolver {
    offers: OfferClient,
    segments: SegmentClient,
    lookup_timeout: Duration,
}

impl OfferResolver {
    pub fn new(offers: OfferClient, segments: SegmentClient, lookup_timeout: Duration) -> Self {
        Self {
            offers,
            segments,
            lookup_timeout,
        }
    }

    /// Resolves the customer's segment, then applies the matching offer.
    #[instrument(
        skip(self, request),
        fields(
            restaurant_id = request.restaurant_id,
            customer_id = request.customer_id,
            cart_value = request.cart_value
        )
    )]
    pub async fn apply_offer(&self, request: &CartCheckoutRequest) -> Result<AppliedOfferResult, ResolveError> {
        let segment = self.resolve_segment(request).await.map_err(|e| {
            error!(error = %e, "Segment lookup failed, no discount applied");
            ResolveError::unresolved(request.customer_id, &e)
        })?;
        Ok(self.apply(request, &segment))
    }

    /// Applies the offer registered for `segment`, or passes the cart through
    /// unchanged when there is none.
    #[instrument(skip(self, request), fields(restaurant_id = request.restaurant_id))]
    pub fn apply(&self, request: &CartCheckoutRequest, segment: &str) -> AppliedOfferResult {
        match self.offers.lookup(request.restaurant_id, segment) {
            Some(offer) => {
                let result = AppliedOfferResult::with_offer(request.cart_value, offer);
                info!(
                    final_cart_value = result.final_cart_value,
                    discount = result.discount(),
                    "Offer applied"
                );
                result
            }
            None => {
                debug!("No offer for segment");
                AppliedOfferResult::unchanged(request.cart_value)
            }
        }
    }

    async fn resolve_segment(&self, request: &CartCheckoutRequest) -> Result<String, LookupError> {
        let lookup = self.segments.resolve_segment(request.customer_id);
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::ActorCommunicationError(format!(
                "Segment lookup timed out after {}ms",
                self.lookup_timeout.as_millis()
            ))),
        }
    }
}
