use serde::{Deserialize, Serialize};

use storefront_core::{CustomerId, DomainError, DomainResult, Entity};

/// Customer record as resolved by a [`crate::CustomerDirectory`].
///
/// The order workflow only needs to know the customer exists; the full record
/// is attached to the stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation(format!(
                "invalid customer email: {email}"
            )));
        }

        Ok(Self { id, name, email })
    }

    /// Rebuild a record read back from storage. Skips the checks in
    /// [`Customer::new`]; stored rows are taken as they are.
    pub fn from_parts(id: CustomerId, name: String, email: String) -> Self {
        Self { id, name, email }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
