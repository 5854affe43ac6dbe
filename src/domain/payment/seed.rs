use super::{Payment, PaymentRegistry, PaymentStatus, Provider};
use std::collections::HashMap;

/// Ids of the demonstration records inserted by [`seed_demo_payments`].
pub const DEMO_PAYMENT_IDS: [&str; 3] = ["pay_001", "pay_002", "pay_003"];

fn order_metadata(order_id: &str) -> HashMap<String, String> {
    HashMap::from([("order_id".to_string(), order_id.to_string())])
}

/// The three fixed demonstration payments, timestamped with `now`.
pub fn demo_payments(now: i64) -> Vec<Payment> {
    vec![
        Payment {
            id: "pay_001".to_string(),
            provider: Provider::Stripe,
            amount: 99.99,
            currency: "USD".to_string(),
            status: PaymentStatus::Completed,
            customer_email: "alice@example.com".to_string(),
            created_at: now,
            processed_at: now,
            metadata: order_metadata("ORD-001"),
        },
        Payment {
            id: "pay_002".to_string(),
            provider: Provider::Razorpay,
            amount: 1500.00,
            currency: "INR".to_string(),
            status: PaymentStatus::Pending,
            customer_email: "bob@example.com".to_string(),
            created_at: now,
            processed_at: 0,
            metadata: order_metadata("ORD-002"),
        },
        Payment {
            id: "pay_003".to_string(),
            provider: Provider::Paypal,
            amount: 250.00,
            currency: "EUR".to_string(),
            status: PaymentStatus::Completed,
            customer_email: "carol@example.com".to_string(),
            created_at: now,
            processed_at: now,
            metadata: order_metadata("ORD-003"),
        },
    ]
}

/// Startup hook: inserts the demonstration payments. Returns how many were inserted.
pub async fn seed_demo_payments(registry: &PaymentRegistry) -> usize {
    let payments = demo_payments(chrono::Utc::now().timestamp());
    let count = payments.len();
    for payment in payments {
        registry.insert(payment).await;
    }
    log::info!("> Seeded {} demo payments", count);
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_inserts_three_fixed_records() {
        let registry = PaymentRegistry::new();
        assert_eq!(seed_demo_payments(&registry).await, 3);

        for id in DEMO_PAYMENT_IDS {
            assert!(registry.get(id).await.is_some(), "{} missing", id);
        }

        let pending = registry.get("pay_002").await.unwrap();
        assert_eq!(pending.status, PaymentStatus::Pending);
        assert_eq!(pending.processed_at, 0);

        let completed = registry.get("pay_001").await.unwrap();
        assert_eq!(completed.created_at, completed.processed_at);
        assert_eq!(
            completed.metadata.get("order_id").map(String::as_str),
            Some("ORD-001")
        );
    }
}
