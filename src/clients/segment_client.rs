use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::CustomerId;
use crate::messages::SegmentRequest;
use crate::segment_actor::LookupError;

/// Client for a segment lookup service.
#[derive(Clone)]
pub struct SegmentClient {
    sender: mpsc::Sender<SegmentRequest>,
}

impl SegmentClient {
    pub fn new(sender: mpsc::Sender<SegmentRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), LookupError> {
        debug!("Sending shutdown request");
        self.sender
            .send(SegmentRequest::Shutdown)
            .await
            .map_err(|e| LookupError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(SegmentClient => fn resolve_segment(customer_id: CustomerId) -> String as SegmentRequest::ResolveSegment, Error = LookupError);
client_method!(SegmentClient => fn assign_segment(customer_id: CustomerId, segment: String) -> Option<String> as SegmentRequest::AssignSegment, Error = LookupError);
