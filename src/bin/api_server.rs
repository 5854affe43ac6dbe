// src/bin/api_server.rs

use anyhow::Context;
use payment_query_service::domain::payment::seed::seed_demo_payments;
use payment_query_service::infra::logging;
use payment_query_service::transport;
use payment_query_service::{Config, PaymentRegistry, PaymentService};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        log::error!("> Fatal: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- Registry Initialization ---
    log::info!("> Initializing PaymentRegistry (starts empty)...");
    let registry = Arc::new(PaymentRegistry::new());
    if config.seed_demo_data {
        seed_demo_payments(&registry).await;
    } else {
        log::info!("> SEED_DEMO_DATA=false, serving an empty registry.");
    }

    let payment_service =
        PaymentService::new(registry).with_stream_interval(config.stream_interval);
    let app_state = transport::http::AppState { payment_service };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let mut app = transport::http::create_router(app_state);
    if config.api_docs_enabled {
        app = app.merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        );
    }
    let app = app.layer(cors);

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to listen on {}", addr))?;

    log::info!("> PaymentService listening on http://{}", addr);
    log::info!(">   Methods: GetPayment, ListPayments, StreamPayments");
    if config.api_docs_enabled {
        log::info!("> Swagger UI available at http://{}/swagger-ui", addr);
    }
    log::info!("> Press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to serve")?;

    log::info!("> Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. In-flight calls are drained after this returns.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("> Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("> Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("> Shutdown signal received, draining in-flight calls...");
}
