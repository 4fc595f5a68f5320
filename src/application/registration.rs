use crate::domain::customer::{CustomerId, CustomerRegistration};
use crate::domain::ports::CustomerDirectoryBox;
use crate::error::{Result, ServiceError};

/// What a successful registration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new customer was stored.
    Created(CustomerId),
    /// The phone number already belongs to a customer with the same name.
    AlreadyRegistered(CustomerId),
}

impl Registration {
    pub fn customer_id(&self) -> CustomerId {
        match self {
            Registration::Created(id) | Registration::AlreadyRegistered(id) => *id,
        }
    }
}

/// Onboards customers, keyed by phone number.
pub struct CustomerRegistrar {
    directory: CustomerDirectoryBox,
}

impl CustomerRegistrar {
    pub fn new(directory: CustomerDirectoryBox) -> Self {
        Self { directory }
    }

    /// Registers a customer unless its phone number is already taken.
    ///
    /// Re-registering a phone number under the same name is a no-op, even if
    /// other submitted fields differ. A different name is rejected with
    /// `ServiceError::Conflict`.
    pub async fn register(&self, registration: CustomerRegistration) -> Result<Registration> {
        registration.validate()?;

        let phone_number = registration.phone_number.as_str();
        if let Some(existing) = self.directory.find_by_phone(phone_number).await? {
            if existing.name == registration.name {
                tracing::debug!(customer_id = %existing.id, phone_number, "Customer already registered");
                return Ok(Registration::AlreadyRegistered(existing.id));
            }
            tracing::warn!(phone_number, "Phone number already registered to another name");
            return Err(ServiceError::Conflict {
                phone_number: registration.phone_number,
            });
        }

        let customer = registration.into_customer()?;
        let id = customer.id;
        self.directory.save(customer).await?;

        tracing::info!(customer_id = %id, "Customer registered");
        Ok(Registration::Created(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CustomerDirectory;
    use crate::infrastructure::in_memory::InMemoryCustomerDirectory;

    fn registrar() -> (CustomerRegistrar, InMemoryCustomerDirectory) {
        let directory = InMemoryCustomerDirectory::new();
        (CustomerRegistrar::new(Box::new(directory.clone())), directory)
    }

    #[tokio::test]
    async fn test_saves_new_customer_with_given_id() {
        let (registrar, directory) = registrar();
        let id = CustomerId::new();

        let result = registrar
            .register(CustomerRegistration::new("Maryam", "000099").with_id(id))
            .await
            .unwrap();

        assert_eq!(result, Registration::Created(id));
        let stored = directory.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Maryam");
        assert_eq!(stored.phone_number, "000099");
    }

    #[tokio::test]
    async fn test_generates_id_when_missing() {
        let (registrar, directory) = registrar();

        let result = registrar
            .register(CustomerRegistration::new("Maryam", "000099"))
            .await
            .unwrap();

        let stored = directory.find_by_phone("000099").await.unwrap().unwrap();
        assert_eq!(result, Registration::Created(stored.id));
        assert_eq!(stored.name, "Maryam");
    }

    #[tokio::test]
    async fn test_same_name_is_noop() {
        let (registrar, directory) = registrar();
        let first = registrar
            .register(CustomerRegistration::new("Maryam", "000099"))
            .await
            .unwrap();

        // A different id on the repeat submission is ignored.
        let second = registrar
            .register(CustomerRegistration::new("Maryam", "000099").with_id(CustomerId::new()))
            .await
            .unwrap();

        assert_eq!(second, Registration::AlreadyRegistered(first.customer_id()));
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_different_name_conflicts() {
        let (registrar, directory) = registrar();
        registrar
            .register(CustomerRegistration::new("Maryam", "000099"))
            .await
            .unwrap();

        let err = registrar
            .register(CustomerRegistration::new("Alex", "000099"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict { .. }));
        assert!(err.to_string().contains("phone number [000099] is taken"));
        assert_eq!(directory.len().await, 1);
        let stored = directory.find_by_phone("000099").await.unwrap().unwrap();
        assert_eq!(stored.name, "Maryam");
    }

    #[tokio::test]
    async fn test_blank_fields_rejected_before_storage() {
        let (registrar, directory) = registrar();

        let err = registrar
            .register(CustomerRegistration::new(" ", "000099"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(directory.is_empty().await);
    }
}
