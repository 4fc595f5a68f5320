//! Dispatches batch requests to the application services.

use crate::application::{CustomerRegistrar, PaymentProcessor, Registration};
use crate::domain::customer::{CustomerId, CustomerRegistration};
use crate::domain::payment::PaymentRequest;
use crate::error::ServiceError;

/// A single request read from a batch input.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Register(CustomerRegistration),
    Charge {
        customer_id: CustomerId,
        request: PaymentRequest,
    },
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Register(_) => "register",
            Request::Charge { .. } => "charge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

/// Result of one batch row, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub row: usize,
    pub kind: &'static str,
    pub status: Status,
    /// Customer id for registrations, payment id for charges.
    pub reference: Option<String>,
    pub detail: String,
}

impl Outcome {
    pub fn failed(row: usize, kind: &'static str, err: &ServiceError) -> Self {
        Self {
            row,
            kind,
            status: Status::Error,
            reference: None,
            detail: err.to_string(),
        }
    }
}

/// Runs each request through the registrar or processor, one at a time.
pub struct BatchProcessor {
    registrar: CustomerRegistrar,
    processor: PaymentProcessor,
}

impl BatchProcessor {
    pub fn new(registrar: CustomerRegistrar, processor: PaymentProcessor) -> Self {
        Self {
            registrar,
            processor,
        }
    }

    pub async fn handle(&self, row: usize, request: Request) -> Outcome {
        let kind = request.kind();
        let result = match request {
            Request::Register(registration) => {
                self.registrar
                    .register(registration)
                    .await
                    .map(|registration| match registration {
                        Registration::Created(id) => (id.to_string(), "created"),
                        Registration::AlreadyRegistered(id) => (id.to_string(), "existing"),
                    })
            }
            Request::Charge {
                customer_id,
                request,
            } => self
                .processor
                .charge_card(customer_id, request)
                .await
                .map(|payment_id| (payment_id.to_string(), "charged")),
        };

        match result {
            Ok((reference, detail)) => Outcome {
                row,
                kind,
                status: Status::Ok,
                reference: Some(reference),
                detail: detail.to_string(),
            },
            Err(err) => {
                tracing::warn!(row, kind, error = %err, "Request failed");
                Outcome::failed(row, kind, &err)
            }
        }
    }
}
