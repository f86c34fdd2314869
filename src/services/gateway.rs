//! Payment gateway client
//!
//! The gateway protocol is opaque to this server: one POST with the payment
//! block, success or a mapped error. No retries, no reconciliation.

use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::GatewayConfig,
    error::{AppError, AppResult},
    models::reservation::PaymentInfo,
};

#[derive(Clone)]
pub struct PaymentGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl PaymentGateway {
    pub fn new(config: GatewayConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Capture a payment for a reservation
    pub async fn capture(
        &self,
        reservation_id: Uuid,
        amount: Decimal,
        payment: &PaymentInfo,
    ) -> AppResult<()> {
        let response = self
            .client
            .post(&self.config.url)
            .json(&json!({
                "reservationId": reservation_id,
                "amount": amount,
                "method": payment.method,
                "reason": payment.reason,
                "details": payment.details,
            }))
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Gateway unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "Payment capture failed: {}", body);
            return Err(AppError::Gateway(format!("Payment capture failed ({})", status)));
        }
        Ok(())
    }
}
