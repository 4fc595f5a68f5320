use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of a registered customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CustomerId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for CustomerId {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| ServiceError::Validation(format!("invalid customer id '{}': {}", s, e)))
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered customer.
///
/// Customers are keyed by `id` and are unique by `phone_number`. Once stored
/// they are never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone_number: String,
}

impl Customer {
    /// Builds a customer, rejecting a blank name or phone number.
    pub fn new(id: CustomerId, name: impl Into<String>, phone_number: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let phone_number = phone_number.into();
        require_non_blank("name", &name)?;
        require_non_blank("phone number", &phone_number)?;
        Ok(Self {
            id,
            name,
            phone_number,
        })
    }
}

/// A request to onboard a customer. The identifier is optional and generated
/// on first registration when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistration {
    #[serde(default)]
    pub id: Option<CustomerId>,
    pub name: String,
    pub phone_number: String,
}

impl CustomerRegistration {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }

    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("phone number", &self.phone_number)
    }

    /// Converts the request into a storable customer, generating an id if none was supplied.
    pub fn into_customer(self) -> Result<Customer> {
        let id = self.id.unwrap_or_default();
        Customer::new(id, self.name, self.phone_number)
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} must not be blank", field)));
    }
    Ok(())
}
