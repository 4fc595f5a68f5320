use crate::domain::ports::CardGatewayBox;
use crate::error::{Result, ServiceError};
use crate::infrastructure::gateway::{HttpCardGateway, StubCardGateway};
use clap::Args;
use std::fmt;

pub const DEFAULT_GATEWAY_URL: &str = "https://api.stripe.com";

/// Card gateway settings, read from the command line or the environment.
#[derive(Args, Clone)]
pub struct GatewayConfig {
    /// Charge cards through the remote provider instead of the approving stub.
    #[arg(long = "gateway-enabled", env = "CUSTPAY_GATEWAY_ENABLED")]
    pub enabled: bool,

    /// Base URL of the provider's charges API.
    #[arg(long = "gateway-url", env = "CUSTPAY_GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL)]
    pub base_url: String,

    /// Secret API key for the provider.
    #[arg(long = "gateway-api-key", env = "CUSTPAY_GATEWAY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            api_key: None,
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl GatewayConfig {
    /// Selects the gateway implementation for this configuration.
    pub fn build_gateway(&self) -> Result<CardGatewayBox> {
        if !self.enabled {
            tracing::info!("Card gateway disabled, using approving stub");
            return Ok(Box::new(StubCardGateway::new()));
        }

        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ServiceError::Config(
                    "gateway is enabled but no API key was provided".to_string(),
                )
            })?;

        tracing::info!(base_url = %self.base_url, "Using remote card gateway");
        Ok(Box::new(HttpCardGateway::new(&self.base_url, api_key)))
    }
}
