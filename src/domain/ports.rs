use super::customer::{Customer, CustomerId};
use super::payment::{Amount, ChargeOutcome, Currency, Payment, PaymentId};
use crate::error::{GatewayError, Result};
use async_trait::async_trait;

/// Storage for registered customers.
///
/// Implementations must reject a second customer with an already stored phone
/// number (`ServiceError::Conflict`) or identifier (`ServiceError::DuplicateCustomer`),
/// atomically with respect to concurrent `save` calls.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>>;
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Customer>>;
    async fn save(&self, customer: Customer) -> Result<()>;
}

/// Storage for confirmed payments.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Inserts the payment and returns the identifier assigned to it.
    async fn save(&self, payment: Payment) -> Result<PaymentId>;
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>>;
    async fn find_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Payment>>;
}

/// Capability to debit a card through a payment provider.
#[async_trait]
pub trait CardGateway: Send + Sync {
    async fn charge(
        &self,
        source: &str,
        amount: Amount,
        currency: Currency,
        description: &str,
    ) -> std::result::Result<ChargeOutcome, GatewayError>;
}

pub type CustomerDirectoryBox = Box<dyn CustomerDirectory>;
pub type PaymentLedgerBox = Box<dyn PaymentLedger>;
pub type CardGatewayBox = Box<dyn CardGateway>;
