use payment_query_service::domain::payment::seed::seed_demo_payments;
use payment_query_service::{transport, PaymentRegistry, PaymentService};
use std::sync::Arc;
use std::time::Duration;

pub struct TestServer {
    pub base_url: String,
    pub registry: Arc<PaymentRegistry>,
    pub handle: tokio::task::JoinHandle<()>,
}

/// Starts the router in-process on an ephemeral port, optionally with the demo records.
pub async fn spawn_server(seed: bool, stream_interval: Duration) -> TestServer {
    let registry = Arc::new(PaymentRegistry::new());
    if seed {
        seed_demo_payments(&registry).await;
    }

    let payment_service =
        PaymentService::new(registry.clone()).with_stream_interval(stream_interval);
    let router = transport::http::create_router(transport::http::AppState { payment_service });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        registry,
        handle,
    }
}
