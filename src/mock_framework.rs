//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_segment_client`] or [`create_mock_client`] to get a client
//! and the receiver its requests land on, then answer them with the
//! `expect_*` helpers.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest, Snapshot};
use crate::clients::SegmentClient;
use crate::domain::CustomerId;
use crate::messages::{SegmentRequest, ServiceResponse};
use crate::segment_actor::LookupError;
use tokio::sync::{mpsc, oneshot, watch};

/// Creates a segment client whose requests arrive on the returned receiver.
pub fn create_mock_segment_client(buffer_size: usize) -> (SegmentClient, mpsc::Receiver<SegmentRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (SegmentClient::new(sender), receiver)
}

/// Helper to verify that the next message is a ResolveSegment request
pub async fn expect_resolve(
    receiver: &mut mpsc::Receiver<SegmentRequest>,
) -> Option<(CustomerId, ServiceResponse<String, LookupError>)> {
    match receiver.recv().await {
        Some(SegmentRequest::ResolveSegment { customer_id, respond_to }) => Some((customer_id, respond_to)),
        _ => None,
    }
}

/// Creates a resource client backed by nothing but a channel and an empty,
/// never-updated snapshot.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>, watch::Sender<Snapshot<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (store, snapshot) = watch::channel(Snapshot::default());
    (ResourceClient::new(sender, snapshot), receiver, store)
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<(), FrameworkError<T::Key>>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Insert { entity, respond_to }) => Some((entity, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::OfferClient;
    use crate::domain::{Offer, OfferRequest};
    use crate::offer_actor::RegistryError;

    #[tokio::test]
    async fn test_mock_segment_client() {
        let (client, mut receiver) = create_mock_segment_client(10);

        let task = tokio::spawn(async move { client.resolve_segment(9).await });

        let (customer_id, responder) = expect_resolve(&mut receiver).await.expect("Expected ResolveSegment");
        assert_eq!(customer_id, 9);
        responder.send(Ok("gold".to_string())).unwrap();

        assert_eq!(task.await.unwrap(), Ok("gold".to_string()));
    }

    #[tokio::test]
    async fn test_registry_dropping_reply_is_unavailable() {
        let (inner, mut receiver, _store) = create_mock_client::<Offer>(10);
        let offers = OfferClient::new(inner);

        let task = tokio::spawn(async move {
            offers
                .create_offer(OfferRequest::new(1, "FLATX", 10, vec!["p1".to_string()]))
                .await
        });

        let (offer, responder) = expect_insert(&mut receiver).await.expect("Expected Insert");
        assert_eq!(offer.restaurant_id(), 1);
        drop(responder);

        let result = task.await.unwrap();
        assert!(matches!(
            result,
            Err(crate::error::CreateOfferError::Registry(RegistryError::RegistryUnavailable(_)))
        ));
    }
}
