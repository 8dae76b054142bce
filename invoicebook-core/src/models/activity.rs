use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::require;
use crate::error::AppResult;

/// Audit entry attached to an invoice. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceActivity {
    pub activity_id: Uuid,
    pub invoice_id: Uuid,

    /// User who caused the event
    pub user_id: Uuid,

    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Per-user activity feed entry, mirrored from invoice activities on creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecentActivity {
    pub activity_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Request to append an activity to an existing invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddInvoiceActivity {
    pub invoice_id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
}

impl AddInvoiceActivity {
    pub fn validate(&self) -> AppResult<()> {
        require("invoice_id", &self.invoice_id)?;
        require("user_id", &self.user_id)?;
        require("title", &self.title)?;
        require("description", &self.description)
    }
}
