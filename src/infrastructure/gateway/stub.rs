use crate::domain::payment::{Amount, ChargeOutcome, Currency};
use crate::domain::ports::CardGateway;
use crate::error::GatewayError;
use async_trait::async_trait;

/// Stand-in gateway that approves every charge without contacting a provider.
///
/// Selected when no real provider is configured, e.g. for local runs and tests.
#[derive(Debug, Default, Clone)]
pub struct StubCardGateway;

impl StubCardGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CardGateway for StubCardGateway {
    async fn charge(
        &self,
        source: &str,
        amount: Amount,
        currency: Currency,
        _description: &str,
    ) -> Result<ChargeOutcome, GatewayError> {
        tracing::debug!(source, amount = %amount, currency = %currency, "Stub gateway approving charge");
        Ok(ChargeOutcome::debited(None))
    }
}
