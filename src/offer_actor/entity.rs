use crate::actor_framework::Entity;
use crate::domain::{Offer, OfferKey};

impl Entity for Offer {
    type Key = OfferKey;

    /// One key per targeted segment.
    fn keys(&self) -> Vec<OfferKey> {
        Offer::keys(self)
    }
}
