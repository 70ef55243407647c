//! Payment endpoints

use crate::client::DeroMerchantClient;
use crate::types::{CreatePaymentRequest, FilteredPayments, Payment, PaymentFilter};
use crate::Result;

impl DeroMerchantClient {
    /// Create a new payment. The request body is signed with the secret key.
    pub async fn create_payment(&self, currency: &str, amount: f64) -> Result<Payment> {
        let request = self
            .new_request("POST", "/payment")?
            .json(&CreatePaymentRequest { currency, amount })?;
        self.send_signed_request(request).await
    }

    /// Fetch a payment by its ID
    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        let request = self.new_request("GET", &format!("/payment/{}", payment_id))?;
        self.send_request(request).await
    }

    /// Fetch several payments by ID, in the order given.
    ///
    /// The list is forwarded as-is; the service rejects an empty one.
    pub async fn get_payments<S: AsRef<str>>(&self, payment_ids: &[S]) -> Result<Vec<Payment>> {
        let ids: Vec<&str> = payment_ids.iter().map(AsRef::as_ref).collect();
        let request = self.new_request("POST", "/payments")?.json(&ids)?;
        self.send_request(request).await
    }

    /// Fetch one page of payments matching `filter`
    pub async fn get_filtered_payments(&self, filter: &PaymentFilter) -> Result<FilteredPayments> {
        let request = self
            .new_request("GET", "/payments")?
            .query("limit", filter.limit)
            .query("page", filter.page)
            .query("sort_by", &filter.sort_by)
            .query("order_by", &filter.order_by)
            .query("status", &filter.status)
            .query("currency", &filter.currency);
        self.send_request(request).await
    }
}
