use crate::domain::customer::CustomerId;
use crate::domain::payment::{Currency, Payment, PaymentId, PaymentRequest};
use crate::domain::ports::{CardGatewayBox, CustomerDirectoryBox, PaymentLedgerBox};
use crate::error::{Result, ServiceError};

/// Currencies the processor accepts for card charges.
pub const SUPPORTED_CURRENCIES: &[Currency] = &[Currency::Usd];

/// Charges cards on behalf of registered customers.
///
/// A payment reaches the ledger only after the gateway confirms the card was
/// debited. Every check runs before the gateway is called, so a rejected
/// request never touches the gateway or the ledger.
pub struct PaymentProcessor {
    directory: CustomerDirectoryBox,
    ledger: PaymentLedgerBox,
    gateway: CardGatewayBox,
}

impl PaymentProcessor {
    /// Creates a new `PaymentProcessor`.
    ///
    /// # Arguments
    ///
    /// * `directory` - Used to check that the paying customer exists.
    /// * `ledger` - Receives confirmed payments.
    /// * `gateway` - Debits the card.
    pub fn new(
        directory: CustomerDirectoryBox,
        ledger: PaymentLedgerBox,
        gateway: CardGatewayBox,
    ) -> Self {
        Self {
            directory,
            ledger,
            gateway,
        }
    }

    /// Charges the customer's card and records the payment.
    ///
    /// Returns the identifier the ledger assigned to the payment.
    pub async fn charge_card(
        &self,
        customer_id: CustomerId,
        request: PaymentRequest,
    ) -> Result<PaymentId> {
        if self.directory.find_by_id(customer_id).await?.is_none() {
            return Err(ServiceError::CustomerNotFound { customer_id });
        }

        if !SUPPORTED_CURRENCIES.contains(&request.currency) {
            tracing::warn!(customer_id = %customer_id, currency = %request.currency, "Unsupported currency");
            return Err(ServiceError::UnsupportedCurrency(request.currency));
        }

        let outcome = self
            .gateway
            .charge(
                &request.source,
                request.amount,
                request.currency,
                &request.description,
            )
            .await
            .inspect_err(|e| {
                tracing::error!(customer_id = %customer_id, error = %e, "Card gateway failure");
            })?;

        if !outcome.card_debited {
            tracing::warn!(customer_id = %customer_id, reference = ?outcome.reference, "Card not debited");
            return Err(ServiceError::ChargeDeclined { customer_id });
        }

        let payment_id = self
            .ledger
            .save(Payment::for_customer(customer_id, request))
            .await?;

        tracing::info!(
            customer_id = %customer_id,
            payment_id = %payment_id,
            reference = ?outcome.reference,
            "Payment recorded"
        );
        Ok(payment_id)
    }
}
