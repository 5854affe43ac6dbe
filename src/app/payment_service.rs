//! The Payment Query Service.
//!
//! Three stateless query handlers over a shared [`PaymentRegistry`]:
//! 1.  Point lookup by id.
//! 2.  Filtered listing with a bounded result size.
//! 3.  A paced replay of the registry snapshot as a stream of events.
//!
//! Handlers know nothing about HTTP. The streaming handler writes to an
//! [`EventSink`], which the transport layer implements.

use crate::app::error::{Result, ServiceError, SinkError};
use crate::domain::payment::{Payment, PaymentEvent, PaymentRegistry, PaymentStatus, Provider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Duration;
use utoipa::ToSchema;

/// Limit applied when the caller's limit is absent or out of range.
pub const DEFAULT_LIST_LIMIT: usize = 10;
/// Largest limit honoured as given. Anything above it falls back to the default, not to this.
pub const MAX_LIST_LIMIT: i64 = 100;
/// Pause between streamed events.
pub const DEFAULT_STREAM_INTERVAL: Duration = Duration::from_millis(100);

/// Result of a list query.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PaymentList {
    pub payments: Vec<Payment>,
    /// Number of records in `payments`, not the number of matches before truncation.
    pub total_count: usize,
    /// Always empty: pagination is not implemented.
    pub next_cursor: String,
}

/// Receiving end of a payment stream.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Delivers one event. An error means the receiver is gone and the stream must stop.
    async fn send(&mut self, event: PaymentEvent) -> std::result::Result<(), SinkError>;

    /// Resolves once the receiver has gone away.
    async fn closed(&self);
}

#[async_trait]
impl EventSink for mpsc::Sender<PaymentEvent> {
    async fn send(&mut self, event: PaymentEvent) -> std::result::Result<(), SinkError> {
        mpsc::Sender::send(self, event)
            .await
            .map_err(|_| SinkError::Closed)
    }

    async fn closed(&self) {
        mpsc::Sender::closed(self).await
    }
}

/// Maps a caller-supplied limit to the number of records a list call returns at most.
///
/// `0`, negatives, absent values and anything above [`MAX_LIST_LIMIT`] all become
/// [`DEFAULT_LIST_LIMIT`].
pub fn effective_limit(limit: Option<i64>) -> usize {
    match limit {
        Some(n) if n > 0 && n <= MAX_LIST_LIMIT => n as usize,
        _ => DEFAULT_LIST_LIMIT,
    }
}

#[derive(Clone)]
pub struct PaymentService {
    registry: Arc<PaymentRegistry>,
    stream_interval: Duration,
}

impl PaymentService {
    pub fn new(registry: Arc<PaymentRegistry>) -> Self {
        Self {
            registry,
            stream_interval: DEFAULT_STREAM_INTERVAL,
        }
    }

    pub fn with_stream_interval(mut self, interval: Duration) -> Self {
        self.stream_interval = interval;
        self
    }

    pub fn registry(&self) -> &Arc<PaymentRegistry> {
        &self.registry
    }

    /// Returns the payment with the given id.
    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        log::info!("[RPC] GetPayment called: {}", payment_id);

        if payment_id.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "payment_id is required".to_string(),
            ));
        }

        self.registry
            .get(payment_id)
            .await
            .ok_or_else(|| ServiceError::NotFound(payment_id.to_string()))
    }

    /// Returns up to `effective_limit(limit)` payments matching both filters,
    /// in registry iteration order.
    pub async fn list_payments(
        &self,
        provider: Provider,
        status: PaymentStatus,
        limit: Option<i64>,
    ) -> Result<PaymentList> {
        log::info!(
            "[RPC] ListPayments called: provider={}, status={}, limit={:?}",
            provider,
            status,
            limit
        );

        let limit = effective_limit(limit);
        let payments: Vec<Payment> = self
            .registry
            .list_all()
            .await
            .into_iter()
            .filter(|p| p.matches_provider(provider) && p.matches_status(status))
            .take(limit)
            .collect();

        Ok(PaymentList {
            total_count: payments.len(),
            payments,
            next_cursor: String::new(),
        })
    }

    /// Replays the current registry snapshot into `sink`, one `existing` event per
    /// payment matching `provider`, pausing between events.
    ///
    /// The stream is finite. Returns the number of events delivered.
    pub async fn stream_payments<S>(&self, provider: Provider, sink: &mut S) -> Result<usize>
    where
        S: EventSink + ?Sized,
    {
        log::info!("[RPC] StreamPayments started: provider={}", provider);

        let snapshot = self.registry.list_all().await;
        let mut sent = 0;

        for payment in snapshot
            .into_iter()
            .filter(|p| p.matches_provider(provider))
        {
            let id = payment.id.clone();
            sink.send(PaymentEvent::existing(payment))
                .await
                .map_err(|e| stream_aborted(&id, e))?;
            sent += 1;

            tokio::select! {
                _ = tokio::time::sleep(self.stream_interval) => {}
                _ = sink.closed() => return Err(stream_aborted(&id, SinkError::Closed)),
            }
        }

        log::info!("[RPC] StreamPayments completed: {} events sent", sent);
        Ok(sent)
    }
}

fn stream_aborted(last_id: &str, err: SinkError) -> ServiceError {
    log::warn!("[STREAM] Aborted after {}: {}", last_id, err);
    ServiceError::Internal(format!("failed to send: {}", err))
}
