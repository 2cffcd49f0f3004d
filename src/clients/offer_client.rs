use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{Offer, OfferKey, OfferRequest, RestaurantId};
use crate::error::CreateOfferError;
use crate::offer_actor::{validate, RegistryError};

/// Client for the offer registry actor.
///
/// Writes go through the registry actor; reads come from its published
/// snapshot and never queue behind writes.
#[derive(Clone)]
pub struct OfferClient {
    inner: ResourceClient<Offer>,
}

impl OfferClient {
    pub fn new(inner: ResourceClient<Offer>) -> Self {
        Self { inner }
    }

    /// Validates the request, then inserts it.
    #[instrument(skip(self, request), fields(restaurant_id = ?request.restaurant_id, offer_type = ?request.offer_type))]
    pub async fn create_offer(&self, request: OfferRequest) -> Result<Offer, CreateOfferError> {
        let offer = validate(&request).map_err(|e| {
            warn!(error = %e, "Offer rejected by validation");
            e
        })?;
        self.insert(offer.clone()).await?;
        info!(segments = offer.customer_segments().len(), "Offer created");
        Ok(offer)
    }

    /// All-or-nothing insert across every segment of the offer.
    #[instrument(skip(self, offer), fields(restaurant_id = offer.restaurant_id()))]
    pub async fn insert(&self, offer: Offer) -> Result<(), RegistryError> {
        debug!("Sending request");
        self.inner.insert(offer).await.map_err(RegistryError::from)
    }

    pub fn lookup(&self, restaurant_id: RestaurantId, segment: &str) -> Option<Offer> {
        self.inner
            .get(&OfferKey::new(restaurant_id, segment))
            .map(|offer| Offer::clone(&offer))
    }

    pub fn offers_for_restaurant(&self, restaurant_id: RestaurantId) -> Vec<Offer> {
        self.inner
            .entities(|offer| offer.restaurant_id() == restaurant_id)
            .iter()
            .map(|offer| Offer::clone(offer))
            .collect()
    }

    pub fn offer_count(&self) -> usize {
        self.inner.len()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), RegistryError> {
        debug!("Sending shutdown request");
        self.inner.shutdown().await.map_err(RegistryError::from)
    }
}
