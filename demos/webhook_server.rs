//! Example Axum server receiving DERO Merchant webhook notifications
//!
//! Set `DERO_MERCHANT_WEBHOOK_SECRET_KEY` to the key shown in the merchant dashboard.

use dero_merchant::axum::{webhook_router, VerifiedPaymentUpdate};
use dero_merchant::WebhookOptions;

async fn payment_update(VerifiedPaymentUpdate(event): VerifiedPaymentUpdate) -> &'static str {
    tracing::info!(
        payment_id = %event.payment_id,
        status = %event.status,
        "payment status changed"
    );
    "ok"
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let options = WebhookOptions::from_env()?;
    let app = webhook_router("/dero-merchant/webhook", &options, payment_update)?;

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    println!("Listening for webhooks on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
