//! Concurrent writers and readers against one shared registry.

use payment_query_service::{Payment, PaymentRegistry, PaymentService, PaymentStatus, Provider};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;

const N: usize = 200;

fn payment(i: usize) -> Payment {
    let provider = match i % 3 {
        0 => Provider::Stripe,
        1 => Provider::Razorpay,
        _ => Provider::Paypal,
    };
    Payment {
        id: format!("pay_{:04}", i),
        provider,
        amount: i as f64 * 1.5,
        currency: "USD".to_string(),
        status: PaymentStatus::Pending,
        customer_email: format!("user{}@example.com", i),
        created_at: i as i64,
        processed_at: 0,
        metadata: HashMap::from([("order_id".to_string(), format!("ORD-{:04}", i))]),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_then_concurrent_gets() {
    let registry = Arc::new(PaymentRegistry::new());
    let service = PaymentService::new(registry.clone());

    let mut order: Vec<usize> = (0..N).collect();
    order.shuffle(&mut rand::thread_rng());

    let writers: Vec<_> = order
        .iter()
        .map(|&i| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.insert(payment(i)).await })
        })
        .collect();
    for w in writers {
        w.await.unwrap();
    }
    assert_eq!(registry.len().await, N);

    order.shuffle(&mut rand::thread_rng());
    let readers: Vec<_> = order
        .iter()
        .map(|&i| {
            let service = service.clone();
            tokio::spawn(async move { (i, service.get_payment(&format!("pay_{:04}", i)).await) })
        })
        .collect();
    for r in readers {
        let (i, result) = r.await.unwrap();
        assert_eq!(result.unwrap(), payment(i));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reads_during_writes_never_see_torn_records() {
    let registry = Arc::new(PaymentRegistry::new());
    let service = PaymentService::new(registry.clone());

    let writer = {
        let registry = registry.clone();
        tokio::spawn(async move {
            for i in 0..N {
                registry.insert(payment(i)).await;
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    let list = service
                        .list_payments(Provider::Unknown, PaymentStatus::Unknown, Some(100))
                        .await
                        .unwrap();
                    assert!(list.payments.len() <= 100);
                    for p in list.payments {
                        let i: usize = p.id.trim_start_matches("pay_").parse().unwrap();
                        assert_eq!(p, payment(i));
                    }
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    writer.await.unwrap();
    for r in readers {
        r.await.unwrap();
    }

    let stripe = service
        .list_payments(Provider::Stripe, PaymentStatus::Unknown, Some(100))
        .await
        .unwrap();
    assert!(stripe.payments.iter().all(|p| p.provider == Provider::Stripe));
    assert_eq!(stripe.total_count, 67);
}
