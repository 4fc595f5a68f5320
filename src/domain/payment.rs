use crate::domain::customer::CustomerId;
use crate::error::{Result, ServiceError};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a positive monetary amount for a charge.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ServiceError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The amount in hundredths of the currency unit, if it is exactly representable.
    pub fn to_minor_units(&self) -> Option<i64> {
        let scaled = self.0.checked_mul(Decimal::ONE_HUNDRED)?;
        if !scaled.fract().is_zero() {
            return None;
        }
        scaled.to_i64()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ServiceError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Gbp,
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "GBP" => Ok(Currency::Gbp),
            "EUR" => Ok(Currency::Eur),
            other => Err(ServiceError::Validation(format!(
                "unknown currency code '{}'",
                other
            ))),
        }
    }
}

/// Identifier assigned to a payment by the ledger on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(pub u64);

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A charge as submitted by the caller, before it is bound to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Amount,
    pub currency: Currency,
    /// Opaque token identifying the funding instrument.
    pub source: String,
    pub description: String,
}

impl PaymentRequest {
    pub fn new(
        amount: Amount,
        currency: Currency,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency,
            source: source.into(),
            description: description.into(),
        }
    }
}

/// A confirmed payment record.
///
/// `id` is `None` until the ledger assigns one on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Option<PaymentId>,
    pub customer_id: CustomerId,
    pub amount: Amount,
    pub currency: Currency,
    pub source: String,
    pub description: String,
}

impl Payment {
    /// Binds a request to the customer it is charged for.
    pub fn for_customer(customer_id: CustomerId, request: PaymentRequest) -> Self {
        Self {
            id: None,
            customer_id,
            amount: request.amount,
            currency: request.currency,
            source: request.source,
            description: request.description,
        }
    }
}

/// Result of a single charge attempt reported by a card gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeOutcome {
    pub card_debited: bool,
    /// Provider-side reference for the charge, when the gateway returns one.
    pub reference: Option<String>,
}

impl ChargeOutcome {
    pub fn debited(reference: Option<String>) -> Self {
        Self {
            card_debited: true,
            reference,
        }
    }

    pub fn declined(reference: Option<String>) -> Self {
        Self {
            card_debited: false,
            reference,
        }
    }
}
