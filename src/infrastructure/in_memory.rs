use crate::domain::customer::{Customer, CustomerId};
use crate::domain::payment::{Payment, PaymentId};
use crate::domain::ports::{CustomerDirectory, PaymentLedger};
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct CustomerTable {
    by_id: HashMap<CustomerId, Customer>,
    phone_index: HashMap<String, CustomerId>,
}

/// A thread-safe in-memory customer directory.
///
/// The phone index is updated under the same write lock as the customer
/// table, so the uniqueness check and the insert are a single step.
/// Clones share the same underlying table.
#[derive(Default, Clone)]
pub struct InMemoryCustomerDirectory {
    table: Arc<RwLock<CustomerTable>>,
}

impl InMemoryCustomerDirectory {
    /// Creates a new, empty in-memory directory.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        let table = self.table.read().await;
        Ok(table.by_id.get(&id).cloned())
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Customer>> {
        let table = self.table.read().await;
        Ok(table
            .phone_index
            .get(phone_number)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn save(&self, customer: Customer) -> Result<()> {
        let mut table = self.table.write().await;
        if table.phone_index.contains_key(&customer.phone_number) {
            return Err(ServiceError::Conflict {
                phone_number: customer.phone_number,
            });
        }
        if table.by_id.contains_key(&customer.id) {
            return Err(ServiceError::DuplicateCustomer(customer.id));
        }
        table
            .phone_index
            .insert(customer.phone_number.clone(), customer.id);
        table.by_id.insert(customer.id, customer);
        Ok(())
    }
}

#[derive(Default)]
struct PaymentTable {
    payments: HashMap<PaymentId, Payment>,
    last_id: u64,
}

/// A thread-safe in-memory payment ledger.
///
/// Identifiers are allocated sequentially starting at 1.
#[derive(Default, Clone)]
pub struct InMemoryPaymentLedger {
    table: Arc<RwLock<PaymentTable>>,
}

impl InMemoryPaymentLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.payments.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PaymentLedger for InMemoryPaymentLedger {
    async fn save(&self, mut payment: Payment) -> Result<PaymentId> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = PaymentId(table.last_id);
        payment.id = Some(id);
        table.payments.insert(id, payment);
        Ok(id)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>> {
        let table = self.table.read().await;
        Ok(table.payments.get(&id).cloned())
    }

    async fn find_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Payment>> {
        let table = self.table.read().await;
        let mut payments: Vec<Payment> = table
            .payments
            .values()
            .filter(|p| p.customer_id == customer_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.id);
        Ok(payments)
    }
}
