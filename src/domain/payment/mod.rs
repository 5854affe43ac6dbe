//! Payment records and the events derived from them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

pub mod registry;
pub mod seed;

pub use registry::PaymentRegistry;

/// Kind of a stream event.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Replayed from the registry snapshot.
    Existing,
    /// Delivered live. No live source is wired in yet.
    New,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Existing => "existing",
            EventType::New => "new",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment provider. `Unknown` doubles as the "no filter" sentinel in queries.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provider {
    #[default]
    Unknown,
    Stripe,
    Razorpay,
    Paypal,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Unknown => "UNKNOWN",
            Provider::Stripe => "STRIPE",
            Provider::Razorpay => "RAZORPAY",
            Provider::Paypal => "PAYPAL",
        }
    }

    /// True when `self` is a real provider rather than the unset sentinel.
    pub fn is_set(&self) -> bool {
        *self != Provider::Unknown
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UNKNOWN" | "" => Ok(Provider::Unknown),
            "STRIPE" => Ok(Provider::Stripe),
            "RAZORPAY" => Ok(Provider::Razorpay),
            "PAYPAL" => Ok(Provider::Paypal),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

/// Payment lifecycle status. `Unknown` doubles as the "no filter" sentinel.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Unknown,
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unknown => "UNKNOWN",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }

    pub fn is_set(&self) -> bool {
        *self != PaymentStatus::Unknown
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single payment record as held by the registry.
///
/// Records are replaced wholesale on re-insert; there is no partial update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, ToSchema)]
pub struct Payment {
    pub id: String,
    #[serde(default)]
    pub provider: Provider,
    /// Floating-point amount, not suitable for exact arithmetic.
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub customer_email: String,
    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub created_at: i64,
    /// Seconds since the Unix epoch; zero until the payment completes.
    #[serde(default)]
    pub processed_at: i64,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Payment {
    pub fn matches_provider(&self, filter: Provider) -> bool {
        !filter.is_set() || self.provider == filter
    }

    pub fn matches_status(&self, filter: PaymentStatus) -> bool {
        !filter.is_set() || self.status == filter
    }
}

/// One element of the payment stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PaymentEvent {
    pub payment: Payment,
    pub event_type: EventType,
}

impl PaymentEvent {
    pub fn existing(payment: Payment) -> Self {
        Self {
            payment,
            event_type: EventType::Existing,
        }
    }
}
