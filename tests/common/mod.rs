#![allow(dead_code)]

use async_trait::async_trait;
use custpay::domain::payment::{Amount, ChargeOutcome, Currency};
use custpay::domain::ports::CardGateway;
use custpay::error::GatewayError;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// A charge as seen by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeCall {
    pub source: String,
    pub amount: Amount,
    pub currency: Currency,
    pub description: String,
}

/// Gateway double that records every call and approves or declines all of them.
#[derive(Clone)]
pub struct RecordingGateway {
    approve: bool,
    calls: Arc<Mutex<Vec<ChargeCall>>>,
}

impl RecordingGateway {
    pub fn approving() -> Self {
        Self {
            approve: true,
            calls: Arc::default(),
        }
    }

    pub fn declining() -> Self {
        Self {
            approve: false,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<ChargeCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CardGateway for RecordingGateway {
    async fn charge(
        &self,
        source: &str,
        amount: Amount,
        currency: Currency,
        description: &str,
    ) -> Result<ChargeOutcome, GatewayError> {
        self.calls.lock().unwrap().push(ChargeCall {
            source: source.to_string(),
            amount,
            currency,
            description: description.to_string(),
        });
        Ok(if self.approve {
            ChargeOutcome::debited(None)
        } else {
            ChargeOutcome::declined(None)
        })
    }
}

pub const HEADER: [&str; 8] = [
    "type",
    "customer",
    "name",
    "phone",
    "amount",
    "currency",
    "source",
    "description",
];

/// Writes a request CSV with the standard header followed by `rows`.
pub fn write_requests(path: &Path, rows: &[[&str; 8]]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
