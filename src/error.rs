use crate::domain::customer::CustomerId;
use crate::domain::payment::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure of a single card charge attempt at the gateway boundary.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider rejected request ({status}): {code}: {message}")]
    Provider {
        status: u16,
        code: String,
        message: String,
    },
    #[error("amount {0} cannot be expressed in minor units")]
    InvalidAmount(Decimal),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("phone number [{phone_number}] is taken")]
    Conflict { phone_number: String },
    #[error("customer with id [{0}] already exists")]
    DuplicateCustomer(CustomerId),
    #[error("customer with id [{customer_id}] not found")]
    CustomerNotFound { customer_id: CustomerId },
    #[error("currency [{0}] not supported")]
    UnsupportedCurrency(Currency),
    #[error("card not debited for customer {customer_id}")]
    ChargeDeclined { customer_id: CustomerId },
    #[error("cannot make card charge")]
    Gateway(#[source] GatewayError),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
    #[error("internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
