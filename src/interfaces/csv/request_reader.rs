use crate::domain::customer::{CustomerId, CustomerRegistration};
use crate::domain::payment::{Amount, PaymentRequest};
use crate::error::{Result, ServiceError};
use crate::interfaces::batch::Request;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum RequestType {
    Register,
    Charge,
}

/// One CSV row as written by the caller. Which columns are required depends on `type`.
#[derive(Debug, Deserialize)]
struct RequestRecord {
    r#type: RequestType,
    #[serde(default)]
    customer: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    amount: Option<Decimal>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

fn required(field: Option<String>, name: &str) -> Result<String> {
    field.ok_or_else(|| ServiceError::Validation(format!("missing {} column", name)))
}

impl TryFrom<RequestRecord> for Request {
    type Error = ServiceError;

    fn try_from(record: RequestRecord) -> Result<Self> {
        match record.r#type {
            RequestType::Register => {
                let mut registration = CustomerRegistration::new(
                    required(record.name, "name")?,
                    required(record.phone, "phone")?,
                );
                if let Some(id) = record.customer {
                    registration = registration.with_id(id.parse()?);
                }
                Ok(Request::Register(registration))
            }
            RequestType::Charge => {
                let customer_id: CustomerId = required(record.customer, "customer")?.parse()?;
                let amount = record
                    .amount
                    .ok_or_else(|| ServiceError::Validation("missing amount column".to_string()))?;
                let request = PaymentRequest::new(
                    Amount::new(amount)?,
                    required(record.currency, "currency")?.parse()?,
                    required(record.source, "source")?,
                    record.description.unwrap_or_default(),
                );
                Ok(Request::Charge {
                    customer_id,
                    request,
                })
            }
        }
    }
}

/// Reads registration and charge requests from a CSV source.
///
/// Whitespace is trimmed and rows may omit trailing columns they do not use.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and converts requests, one per row.
    pub fn requests(self) -> impl Iterator<Item = Result<Request>> {
        self.reader.into_deserialize().map(|result| {
            let record: RequestRecord = result?;
            Request::try_from(record)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Currency;
    use rust_decimal_macros::dec;

    const HEADER: &str = "type, customer, name, phone, amount, currency, source, description\n";

    fn read(rows: &str) -> Vec<Result<Request>> {
        let data = format!("{}{}", HEADER, rows);
        RequestReader::new(data.as_bytes()).requests().collect()
    }

    #[test]
    fn test_reads_register_and_charge_rows() {
        let id = CustomerId::new();
        let results = read(&format!(
            "register, {id}, Maryam, 000099\ncharge, {id}, , , 100.00, USD, card123xx, Donation\n"
        ));

        assert_eq!(results.len(), 2);
        match results[0].as_ref().unwrap() {
            Request::Register(registration) => {
                assert_eq!(registration.id, Some(id));
                assert_eq!(registration.name, "Maryam");
                assert_eq!(registration.phone_number, "000099");
            }
            other => panic!("expected registration, got {:?}", other),
        }
        match results[1].as_ref().unwrap() {
            Request::Charge {
                customer_id,
                request,
            } => {
                assert_eq!(*customer_id, id);
                assert_eq!(request.amount.value(), dec!(100.00));
                assert_eq!(request.currency, Currency::Usd);
                assert_eq!(request.source, "card123xx");
                assert_eq!(request.description, "Donation");
            }
            other => panic!("expected charge, got {:?}", other),
        }
    }

    #[test]
    fn test_register_without_id() {
        let results = read("register, , Maryam, 000099\n");
        match results[0].as_ref().unwrap() {
            Request::Register(registration) => assert_eq!(registration.id, None),
            other => panic!("expected registration, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_rows() {
        let results = read(
            "invalid, , Maryam, 000099\n\
             register, , , 000099\n\
             charge, not-a-uuid, , , 1.0, USD, card, x\n\
             charge, 7f1c5b1e-8a53-4c39-9d0e-3f5b8e2a6c10, , , -5, USD, card, x\n\
             charge, 7f1c5b1e-8a53-4c39-9d0e-3f5b8e2a6c10, , , 5, JPY, card, x\n",
        );

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.is_err()));
    }
}
