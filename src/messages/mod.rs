use tokio::sync::oneshot;
use crate::domain::CustomerId;
use crate::segment_actor::LookupError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Messages understood by a segment lookup service. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum SegmentRequest {
    ResolveSegment {
        customer_id: CustomerId,
        respond_to: ServiceResponse<String, LookupError>,
    },
    AssignSegment {
        customer_id: CustomerId,
        segment: String,
        respond_to: ServiceResponse<Option<String>, LookupError>,
    },
    Shutdown,
}
