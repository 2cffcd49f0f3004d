mod domain;
mod messages;
mod error;
mod clients;

mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;
mod offer_actor;
mod segment_actor;

use tracing::{error, info, warn, Instrument};
use crate::domain::{CartCheckoutRequest, OfferRequest};
use crate::app_system::{OfferSystem, OfferSystemConfig, setup_tracing};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = OfferSystemConfig::from_env().map_err(|e| e.to_string())?;
    info!("Starting application with offer system");

    let system = OfferSystem::new(&config);

    // Seed the segment directory
    for (customer_id, segment) in [(1, "p1"), (2, "p2"), (3, "p3")] {
        system
            .segment_client
            .assign_segment(customer_id, segment.to_string())
            .await
            .map_err(|e| e.to_string())?;
    }

    let span = tracing::info_span!("offer_creation");
    async {
        let requests = [
            OfferRequest::new(1, "FLATX", 10, vec!["p1".to_string()]),
            OfferRequest::new(1, "FLATPERCENT", 10, vec!["p2".to_string()]),
            // Rejected: p1 is already taken at restaurant 1
            OfferRequest::new(1, "FLATPERCENT", 25, vec!["p1".to_string(), "p3".to_string()]),
            // Rejected: unknown offer type
            OfferRequest::new(1, "UNKNOWN_TYPE", 10, vec!["p3".to_string()]),
        ];
        for request in requests {
            match system.offer_client.create_offer(request).await {
                Ok(offer) => info!(offer_type = %offer.offer_type(), value = offer.offer_value(), "Offer created"),
                Err(e) => warn!(error = %e, "Offer rejected"),
            }
        }
        info!(
            restaurant_offers = system.offer_client.offers_for_restaurant(1).len(),
            total_offers = system.offer_client.offer_count(),
            "Registry seeded"
        );
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("checkout");
    async {
        for customer_id in [1, 2, 3, 4] {
            let request = CartCheckoutRequest::new(1, customer_id, 205);
            match system.resolver.apply_offer(&request).await {
                Ok(result) => info!(
                    customer_id,
                    final_cart_value = result.final_cart_value,
                    offer_applied = result.is_offer_applied(),
                    "Checkout priced"
                ),
                Err(e) => error!(customer_id, error = %e, "Checkout failed"),
            }
        }
    }
    .instrument(span)
    .await;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
