use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::require;
use crate::error::AppResult;

/// Bank account details a user can be paid into.
///
/// Maps to the `user_payment_methods` table. Each row belongs to exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentMethod {
    pub payment_method_id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub bank_address: String,
    pub swift_code: String,

    /// Not consulted by any current operation
    pub is_default: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payment method registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPaymentMethod {
    pub user_id: String,
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub bank_address: String,
    pub swift_code: String,
}

impl AddPaymentMethod {
    pub fn validate(&self) -> AppResult<()> {
        require("user_id", &self.user_id)?;
        require("account_name", &self.account_name)?;
        require("account_number", &self.account_number)?;
        require("bank_name", &self.bank_name)?;
        require("bank_address", &self.bank_address)?;
        require("swift_code", &self.swift_code)
    }
}
