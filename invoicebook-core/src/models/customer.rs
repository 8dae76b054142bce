use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::require;
use crate::error::AppResult;

/// Customer model representing an invoice recipient.
///
/// Customers are independent of users and are referenced by invoices.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCustomer {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

impl AddCustomer {
    pub fn validate(&self) -> AppResult<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("phone_number", &self.phone_number)?;
        require("address", &self.address)
    }
}
