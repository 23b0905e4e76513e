//! In-memory request log backend.
//!
//! Stands in for the framework's persisted integration-request documents in
//! tests and in embedders that bring no persistence layer of their own.

use std::sync::{Arc, Mutex};

use error_stack::report;
use gateway_interfaces::{
    request_log::{RequestLog, RequestLogError, RequestLogRecord},
    types::{PaymentAttempt, RequestLogStatus},
    CustomResult,
};
use time::OffsetDateTime;

/// One recorded payment attempt.
#[derive(Debug)]
pub struct InMemoryRecord {
    service: String,
    data: serde_json::Value,
    created_at: OffsetDateTime,
    status: Mutex<RequestLogStatus>,
}

impl InMemoryRecord {
    /// Service name the attempt was recorded for.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The serialized attempt payload.
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// When the attempt was recorded.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

#[async_trait::async_trait]
impl RequestLogRecord for InMemoryRecord {
    fn status(&self) -> RequestLogStatus {
        self.status
            .lock()
            .map(|status| *status)
            .unwrap_or(RequestLogStatus::Error)
    }

    async fn set_status(&self, status: RequestLogStatus) -> CustomResult<(), RequestLogError> {
        let mut guard = self
            .status
            .lock()
            .map_err(|_| report!(RequestLogError::StatusUpdateFailed))?;
        *guard = status;
        Ok(())
    }
}

/// Request log keeping records in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRequestLog {
    records: Arc<Mutex<Vec<Arc<InMemoryRecord>>>>,
}

impl InMemoryRequestLog {
    /// A fresh, empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record created so far.
    pub fn records(&self) -> Vec<Arc<InMemoryRecord>> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl RequestLog for InMemoryRequestLog {
    async fn create(
        &self,
        attempt: &PaymentAttempt,
        service: &str,
    ) -> CustomResult<Arc<dyn RequestLogRecord>, RequestLogError> {
        let data = serde_json::to_value(attempt)
            .map_err(|_| report!(RequestLogError::CreationFailed))?;
        let record = Arc::new(InMemoryRecord {
            service: service.to_string(),
            data,
            created_at: OffsetDateTime::now_utc(),
            status: Mutex::new(RequestLogStatus::Queued),
        });
        self.records
            .lock()
            .map_err(|_| report!(RequestLogError::CreationFailed))?
            .push(Arc::clone(&record));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use gateway_interfaces::types::PaymentReference;
    use masking::Secret;

    use super::*;

    fn attempt() -> PaymentAttempt {
        PaymentAttempt {
            amount: 25.0,
            currency: "PEN".to_string(),
            source_token: Secret::new("tok_visa".to_string()),
            description: Some("Order 42".to_string()),
            payer_email: Some("payer@example.com".to_string()),
            payer_name: None,
            order_id: Some("ORD-42".to_string()),
            reference: Some(PaymentReference::new("Payment Request", "PR-0042")),
            redirect_to: None,
            redirect_message: None,
        }
    }

    #[tokio::test]
    async fn records_start_queued() {
        let log = InMemoryRequestLog::new();
        let record = log.create(&attempt(), "Izipay").await.unwrap();
        assert_eq!(RequestLogStatus::Queued, record.status());

        let records = log.records();
        assert_eq!(1, records.len());
        assert_eq!("Izipay", records[0].service());
        assert_eq!(
            Some(&serde_json::json!("PEN")),
            records[0].data().get("currency")
        );
    }

    #[tokio::test]
    async fn status_update_is_visible_through_the_log() {
        let log = InMemoryRequestLog::new();
        let record = log.create(&attempt(), "Izipay").await.unwrap();
        record.set_status(RequestLogStatus::Completed).await.unwrap();
        assert_eq!(RequestLogStatus::Completed, log.records()[0].status());
    }
}
