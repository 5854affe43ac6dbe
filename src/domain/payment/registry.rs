//! PaymentRegistry: the in-memory keyed store of payment records.

use crate::domain::payment::Payment;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A registry that maps payment ids to their records.
///
/// All access goes through one reader/writer lock over the whole map:
/// readers share it, a writer excludes everyone else.
#[derive(Default)]
pub struct PaymentRegistry {
    payments: RwLock<HashMap<String, Payment>>,
}

impl PaymentRegistry {
    /// Creates a new empty PaymentRegistry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the record, replacing any previous record with the same id.
    pub async fn insert(&self, payment: Payment) {
        let id = payment.id.clone();
        let mut payments = self.payments.write().await;
        payments.insert(id.clone(), payment);
        drop(payments);
        log::info!("[STORE] Added payment: {}", id);
    }

    /// Retrieves a payment by id.
    pub async fn get(&self, id: &str) -> Option<Payment> {
        let payments = self.payments.read().await;
        payments.get(id).cloned()
    }

    /// Copies every record out under the read lock.
    /// Order follows map iteration and is unspecified.
    pub async fn list_all(&self) -> Vec<Payment> {
        let payments = self.payments.read().await;
        payments.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{PaymentStatus, Provider};

    fn payment(id: &str, amount: f64) -> Payment {
        Payment {
            id: id.to_string(),
            provider: Provider::Stripe,
            amount,
            currency: "USD".to_string(),
            status: PaymentStatus::Pending,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let registry = PaymentRegistry::new();
        assert!(registry.is_empty().await);

        registry.insert(payment("pay_1", 10.0)).await;

        let stored = registry.get("pay_1").await;
        assert_eq!(stored, Some(payment("pay_1", 10.0)));
        assert!(registry.get("pay_2").await.is_none());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_replaces_whole_record() {
        let registry = PaymentRegistry::new();
        let mut first = payment("pay_1", 10.0);
        first
            .metadata
            .insert("order_id".to_string(), "ORD-1".to_string());
        registry.insert(first).await;

        let second = payment("pay_1", 20.0);
        registry.insert(second.clone()).await;

        let stored = registry.get("pay_1").await.unwrap();
        assert_eq!(stored, second);
        assert!(stored.metadata.is_empty(), "no merge with the old record");
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_repeated_identical_insert_is_idempotent() {
        let registry = PaymentRegistry::new();
        registry.insert(payment("pay_1", 10.0)).await;
        let before = registry.list_all().await;

        registry.insert(payment("pay_1", 10.0)).await;
        registry.insert(payment("pay_1", 10.0)).await;

        assert_eq!(registry.list_all().await, before);
    }

    #[tokio::test]
    async fn test_list_all_is_a_snapshot() {
        let registry = PaymentRegistry::new();
        registry.insert(payment("pay_1", 1.0)).await;
        registry.insert(payment("pay_2", 2.0)).await;

        let snapshot = registry.list_all().await;
        registry.insert(payment("pay_3", 3.0)).await;

        let mut ids: Vec<String> = snapshot.into_iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["pay_1", "pay_2"]);
        assert_eq!(registry.len().await, 3);
    }
}
