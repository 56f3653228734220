//! SMS notifier: thin wrapper over an HTTP SMS gateway
//!
//! Fire-and-forget: delivery failures are logged and never fail the
//! request that triggered them. Disabled entirely when the gateway is not
//! configured.

use serde_json::json;

pub struct SmsNotifier {
    http_client: reqwest::Client,
    gateway_url: Option<String>,
    api_key: Option<String>,
}

impl SmsNotifier {
    pub fn new(gateway_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            gateway_url,
            api_key,
        }
    }

    /// Notify a recycler that their payout request was approved
    pub async fn notify_payout_approved(&self, phone: &str, total_revenue: f64) {
        let message = format!(
            "Your GreenCycle payout request for {total_revenue:.2} has been approved."
        );
        self.send(phone, &message).await;
    }

    async fn send(&self, phone: &str, message: &str) {
        let Some(gateway_url) = &self.gateway_url else {
            tracing::debug!("SMS gateway not configured, skipping notification");
            return;
        };

        let payload = json!({
            "to": phone,
            "message": message,
            "api_key": self.api_key,
        });

        match self.http_client.post(gateway_url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(phone, "SMS notification sent");
            }
            Ok(response) => {
                tracing::warn!(phone, status = %response.status(), "SMS gateway rejected message");
            }
            Err(e) => {
                tracing::warn!(phone, error = %e, "failed to reach SMS gateway");
            }
        }
    }
}
