use crate::domain::customer::{Customer, CustomerId};
use crate::domain::payment::{Payment, PaymentId};
use crate::domain::ports::{CustomerDirectory, PaymentLedger};
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for customer records keyed by id.
pub const CF_CUSTOMERS: &str = "customers";
/// Column Family mapping phone numbers to customer ids.
pub const CF_CUSTOMER_PHONES: &str = "customer_phones";
/// Column Family for payment records keyed by big-endian payment id.
pub const CF_PAYMENTS: &str = "payments";
/// Column Family for store bookkeeping such as the payment id sequence.
pub const CF_META: &str = "meta";

const NEXT_PAYMENT_ID_KEY: &[u8] = b"next_payment_id";

/// A persistent store implementation using RocksDB.
///
/// Serves as both the customer directory and the payment ledger, using separate
/// Column Families. Writes that must check existing state (phone uniqueness,
/// payment id allocation) run under a store-wide lock and commit through a
/// single `WriteBatch`.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>` and lock).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that all required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [CF_CUSTOMERS, CF_CUSTOMER_PHONES, CF_PAYMENTS, CF_META]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            ServiceError::Internal(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn get_json<T: DeserializeOwned>(&self, cf_name: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn last_payment_id(&self) -> Result<u64> {
        let cf = self.cf(CF_META)?;
        match self.db.get_cf(cf, NEXT_PAYMENT_ID_KEY)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    ServiceError::Internal(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "corrupt payment id sequence",
                    )))
                })?;
                Ok(u64::from_be_bytes(raw))
            }
            None => Ok(0),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

#[async_trait]
impl CustomerDirectory for RocksDBStore {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        self.get_json(CF_CUSTOMERS, id.as_uuid().as_bytes())
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Customer>> {
        let phones = self.cf(CF_CUSTOMER_PHONES)?;
        let Some(id_bytes) = self.db.get_cf(phones, phone_number.as_bytes())? else {
            return Ok(None);
        };
        self.get_json(CF_CUSTOMERS, &id_bytes)
    }

    async fn save(&self, customer: Customer) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let customers = self.cf(CF_CUSTOMERS)?;
        let phones = self.cf(CF_CUSTOMER_PHONES)?;
        let id_key = customer.id.as_uuid().as_bytes();

        if self
            .db
            .get_pinned_cf(phones, customer.phone_number.as_bytes())?
            .is_some()
        {
            return Err(ServiceError::Conflict {
                phone_number: customer.phone_number,
            });
        }
        if self.db.get_pinned_cf(customers, id_key)?.is_some() {
            return Err(ServiceError::DuplicateCustomer(customer.id));
        }

        let mut batch = WriteBatch::default();
        batch.put_cf(customers, id_key, to_json(&customer)?);
        batch.put_cf(phones, customer.phone_number.as_bytes(), id_key);
        self.db.write(batch)?;

        Ok(())
    }
}

#[async_trait]
impl PaymentLedger for RocksDBStore {
    async fn save(&self, mut payment: Payment) -> Result<PaymentId> {
        let _guard = self.write_lock.lock().await;

        let id = PaymentId(self.last_payment_id()? + 1);
        payment.id = Some(id);

        let mut batch = WriteBatch::default();
        batch.put_cf(self.cf(CF_PAYMENTS)?, id.0.to_be_bytes(), to_json(&payment)?);
        batch.put_cf(self.cf(CF_META)?, NEXT_PAYMENT_ID_KEY, id.0.to_be_bytes());
        self.db.write(batch)?;

        Ok(id)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>> {
        self.get_json(CF_PAYMENTS, &id.0.to_be_bytes())
    }

    async fn find_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Payment>> {
        let cf = self.cf(CF_PAYMENTS)?;
        let mut payments = Vec::new();

        // Keys are big-endian ids, so iteration order is insertion order.
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let payment: Payment = serde_json::from_slice(&value)?;
            if payment.customer_id == customer_id {
                payments.push(payment);
            }
        }

        Ok(payments)
    }
}
