use std::sync::Arc;

use crate::{
    types::{PaymentAttempt, RequestLogStatus},
    CustomResult,
};

/// Errors raised by the request log collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RequestLogError {
    /// The audit record could not be persisted.
    #[error("Failed to persist the request log record")]
    CreationFailed,
    /// The resolved status could not be written back to the record.
    #[error("Failed to update the request log status")]
    StatusUpdateFailed,
}

/// Handle to one persisted audit record.
#[async_trait::async_trait]
pub trait RequestLogRecord: Send + Sync {
    /// Current status of the record.
    fn status(&self) -> RequestLogStatus;

    /// Write the resolved status back to the record.
    ///
    /// # Errors
    /// [`RequestLogError::StatusUpdateFailed`] when the backing store
    /// rejects the write.
    async fn set_status(&self, status: RequestLogStatus) -> CustomResult<(), RequestLogError>;
}

/// Persists one audit record per payment attempt.
#[async_trait::async_trait]
pub trait RequestLog: Send + Sync {
    /// Record a payment attempt for `service`, returning a handle to the new
    /// record. Records start out [`RequestLogStatus::Queued`].
    ///
    /// # Errors
    /// [`RequestLogError::CreationFailed`] when the record cannot be
    /// persisted.
    async fn create(
        &self,
        attempt: &PaymentAttempt,
        service: &str,
    ) -> CustomResult<Arc<dyn RequestLogRecord>, RequestLogError>;
}
