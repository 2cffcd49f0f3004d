use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::error::LookupError;
use crate::clients::SegmentClient;
use crate::domain::CustomerId;
use crate::messages::{SegmentRequest, ServiceResponse};

// =============================================================================
// SEGMENT DIRECTORY
// =============================================================================

/// In-memory customer → segment directory.
///
/// Stands in for the external segment lookup service. Anything that answers
/// [`SegmentRequest`] messages can take its place behind a [`SegmentClient`].
pub struct SegmentDirectory {
    receiver: mpsc::Receiver<SegmentRequest>,
    segments: HashMap<CustomerId, String>,
}

impl SegmentDirectory {
    pub fn new(buffer_size: usize) -> (Self, SegmentClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            segments: HashMap::new(),
        };
        let client = SegmentClient::new(sender);
        (service, client)
    }

    #[instrument(name = "segment_directory", skip(self))]
    pub async fn run(mut self) {
        info!("SegmentDirectory starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SegmentRequest::ResolveSegment { customer_id, respond_to } => {
                    self.handle_resolve_segment(customer_id, respond_to);
                }
                SegmentRequest::AssignSegment { customer_id, segment, respond_to } => {
                    self.handle_assign_segment(customer_id, segment, respond_to);
                }
                SegmentRequest::Shutdown => {
                    info!("SegmentDirectory shutting down");
                    break;
                }
            }
        }
        info!("SegmentDirectory stopped");
    }

    #[instrument(fields(customer_id = %customer_id), skip(self, customer_id, respond_to))]
    fn handle_resolve_segment(&self, customer_id: CustomerId, respond_to: ServiceResponse<String, LookupError>) {
        debug!("Processing resolve_segment request");
        let result = match self.segments.get(&customer_id) {
            Some(segment) => {
                debug!(segment = %segment, "Segment found");
                Ok(segment.clone())
            }
            None => {
                warn!("Customer has no segment");
                Err(LookupError::UnknownCustomer(customer_id))
            }
        };
        let _ = respond_to.send(result);
    }

    #[instrument(fields(customer_id = %customer_id, segment = %segment), skip(self, customer_id, segment, respond_to))]
    fn handle_assign_segment(
        &mut self,
        customer_id: CustomerId,
        segment: String,
        respond_to: ServiceResponse<Option<String>, LookupError>,
    ) {
        debug!("Processing assign_segment request");
        if segment.is_empty() {
            warn!("Refusing blank segment label");
            let _ = respond_to.send(Err(LookupError::InvalidSegment(customer_id)));
            return;
        }
        let previous = self.segments.insert(customer_id, segment);
        info!(reassigned = previous.is_some(), "Segment assigned");
        let _ = respond_to.send(Ok(previous));
    }
}
