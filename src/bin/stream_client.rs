use anyhow::Context;
use payment_query_service::infra::logging;
use payment_query_service::transport::http::client::{format_event, SessionStats, SseDecoder};
use payment_query_service::transport::http::types::StreamPaymentsRequest;
use payment_query_service::Provider;

const DEFAULT_URL: &str = "http://127.0.0.1:50051";

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin stream_client -- [--url <base-url>] [--provider <NAME>]\n\
         \n\
         Subscribes to StreamPayments and prints one line per payment.\n\
         --url       defaults to $PAYMENT_SERVICE_URL or {}\n\
         --provider  STRIPE | RAZORPAY | PAYPAL (default: all)\n",
        DEFAULT_URL
    );
    std::process::exit(2);
}

struct Args {
    url: String,
    provider: Provider,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut url = std::env::var("PAYMENT_SERVICE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let mut provider = Provider::Unknown;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => usage_and_exit(),
            "--url" => url = args.next().unwrap_or_else(|| usage_and_exit()),
            "--provider" => {
                let value = args.next().unwrap_or_else(|| usage_and_exit());
                provider = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            }
            _ => usage_and_exit(),
        }
    }

    Ok(Args {
        url: url.trim_end_matches('/').to_string(),
        provider,
    })
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    logging::init();

    let mut stats = SessionStats::new();
    let outcome = tokio::select! {
        result = subscribe(&mut stats) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(())) => {
            println!("> Stream ended by server");
            println!("{}", stats);
        }
        Some(Err(e)) => {
            eprintln!("> Stream error: {:#}", e);
            println!("{}", stats);
            std::process::exit(1);
        }
        None => {
            println!("\n> Shutting down...");
            println!("{}", stats);
        }
    }
}

async fn subscribe(stats: &mut SessionStats) -> anyhow::Result<()> {
    let args = parse_args()?;
    let endpoint = format!("{}/api/payments/stream", args.url);

    println!("> Subscribing to {} (provider={})", endpoint, args.provider);

    let client = reqwest::Client::new();
    let mut response = client
        .post(&endpoint)
        .json(&StreamPaymentsRequest {
            provider: args.provider,
        })
        .send()
        .await
        .with_context(|| format!("Failed to connect to {}", args.url))?
        .error_for_status()
        .context("Server rejected the stream request")?;

    let mut decoder = SseDecoder::new();
    while let Some(chunk) = response.chunk().await.context("Stream interrupted")? {
        for result in decoder.push(&chunk) {
            match result {
                Ok(event) => {
                    stats.record(&event);
                    println!("{}", format_event(&event));
                }
                Err(e) => log::warn!("> Skipping undecodable event: {}", e),
            }
        }
    }

    Ok(())
}
