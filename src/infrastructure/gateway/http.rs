//! Card gateway backed by a Stripe-compatible charges API.

use crate::domain::payment::{Amount, ChargeOutcome, Currency};
use crate::domain::ports::CardGateway;
use crate::error::GatewayError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Form body of a charge request. Amounts are sent in minor units.
#[derive(Debug, Serialize)]
struct ChargeForm<'a> {
    amount: i64,
    currency: String,
    source: &'a str,
    description: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChargeResponse {
    #[serde(default)]
    id: Option<String>,
    paid: bool,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Submits charges to a remote payment provider over HTTPS.
///
/// Each call makes exactly one request; transport and provider failures are
/// returned to the caller as `GatewayError` without retrying.
#[derive(Clone)]
pub struct HttpCardGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpCardGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn charges_url(&self) -> String {
        format!("{}/v1/charges", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CardGateway for HttpCardGateway {
    async fn charge(
        &self,
        source: &str,
        amount: Amount,
        currency: Currency,
        description: &str,
    ) -> Result<ChargeOutcome, GatewayError> {
        let minor_units = amount
            .to_minor_units()
            .ok_or(GatewayError::InvalidAmount(amount.value()))?;

        let form = ChargeForm {
            amount: minor_units,
            currency: currency.code().to_ascii_lowercase(),
            source,
            description,
        };

        let response = self
            .client
            .post(self.charges_url())
            .bearer_auth(&self.api_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Card gateway charge response");

        if status.is_success() {
            let body = response.text().await?;
            let charge: ChargeResponse = serde_json::from_str(&body).map_err(|e| {
                tracing::error!(
                    status = status.as_u16(),
                    error = %e,
                    body = %body,
                    "Card gateway returned an unreadable charge"
                );
                GatewayError::Provider {
                    status: status.as_u16(),
                    code: "invalid_response".to_string(),
                    message: body.clone(),
                }
            })?;
            tracing::info!(
                charge_id = ?charge.id,
                paid = charge.paid,
                currency = %currency,
                "Card gateway charge completed"
            );
            return Ok(if charge.paid {
                ChargeOutcome::debited(charge.id)
            } else {
                ChargeOutcome::declined(charge.id)
            });
        }

        let body = response.text().await?;
        let (code, message) = match serde_json::from_str::<ProviderErrorBody>(&body) {
            Ok(parsed) => (
                parsed
                    .error
                    .code
                    .or(parsed.error.kind)
                    .unwrap_or_else(|| "unknown".to_string()),
                parsed.error.message.unwrap_or_default(),
            ),
            Err(_) => ("unknown".to_string(), body),
        };
        tracing::error!(
            status = status.as_u16(),
            code = %code,
            message = %message,
            "Card gateway rejected charge"
        );
        Err(GatewayError::Provider {
            status: status.as_u16(),
            code,
            message,
        })
    }
}
