use tracing::{error, info};

use super::config::OfferSystemConfig;
use crate::actor_framework::ResourceActor;
use crate::clients::{OfferClient, OfferResolver, SegmentClient};
use crate::domain::Offer;
use crate::segment_actor::SegmentDirectory;

/// The offer engine with its collaborators wired in.
///
/// Owns the registry and segment directory actors. Every instance starts
/// empty and is independent of every other, so tests build one each.
pub struct OfferSystem {
    pub offer_client: OfferClient,
    pub segment_client: SegmentClient,
    pub resolver: OfferResolver,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OfferSystem {
    pub fn new(config: &OfferSystemConfig) -> Self {
        info!(?config, "Starting offer system");

        let (registry_actor, registry_client) = ResourceActor::<Offer>::new(config.registry_buffer);
        let offer_client = OfferClient::new(registry_client);
        let registry_handle = tokio::spawn(registry_actor.run());

        let (directory, segment_client) = SegmentDirectory::new(config.segment_buffer);
        let directory_handle = tokio::spawn(directory.run());

        let resolver = OfferResolver::new(
            offer_client.clone(),
            segment_client.clone(),
            config.segment_lookup_timeout,
        );

        Self {
            offer_client,
            segment_client,
            resolver,
            handles: vec![registry_handle, directory_handle],
        }
    }

    /// Stops both actors and waits for them. Clones of the clients held
    /// elsewhere see `RegistryUnavailable` / `ActorCommunicationError` afterwards.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down offer system...");

        if let Err(e) = self.offer_client.shutdown().await {
            error!(error = %e, "Registry already stopped");
        }
        if let Err(e) = self.segment_client.shutdown().await {
            error!(error = %e, "Segment directory already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Offer system shutdown complete.");
        Ok(())
    }
}
