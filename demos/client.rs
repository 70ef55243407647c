//! Example client creating and polling a DERO Merchant payment
//!
//! Reads its configuration from `DERO_MERCHANT_API_KEY`, `DERO_MERCHANT_SECRET_KEY`
//! and optionally `DERO_MERCHANT_SCHEME`, `DERO_MERCHANT_HOST`, `DERO_MERCHANT_API_VERSION`.

use dero_merchant::{ClientOptions, DeroMerchantClient, PaymentFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = DeroMerchantClient::new(ClientOptions::from_env()?)?;
    println!("Using DERO Merchant API at {}", client.base_url());

    let ping = client.ping().await?;
    println!("Server replied to ping: {}", ping.ping);

    let payment = client.create_payment("USD", 1.0).await?;
    println!("Created payment {}", payment.payment_id);
    println!("  Pay {} DERO to {}", payment.dero_amount, payment.integrated_address);
    println!("  Pay helper: {}", client.pay_helper_url(&payment.payment_id));

    let fetched = client.get_payment(&payment.payment_id).await?;
    println!("Payment status: {}", fetched.status);

    let page = client
        .get_filtered_payments(&PaymentFilter::new(10, 1).sorted_by("creation_time", "desc"))
        .await?;
    println!(
        "Latest {} of {} payments:",
        page.payments.len(),
        page.total_payments
    );
    for payment in &page.payments {
        println!("  {} {}", payment.payment_id, payment.status);
    }

    match client.get_payment("does-not-exist").await {
        Ok(payment) => println!("Unexpectedly found {}", payment.payment_id),
        Err(err) if err.is_api_error() => println!("Server rejected lookup: {}", err),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
