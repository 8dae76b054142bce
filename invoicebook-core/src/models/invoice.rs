use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{InvoiceActivity, PaymentMethod};
use crate::error::AppError;

/// Invoice status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Pending,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact match only: `"PAID"` and `" paid "` are rejected.
impl FromStr for InvoiceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::InvalidStatus(s.to_string()))
    }
}

impl TryFrom<String> for InvoiceStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Invoice model, the aggregate root.
///
/// Maps to the `invoices` table. Amounts are stored as supplied by the
/// caller; `final_amount` is not re-derived from the total and discount.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub invoice_id: Uuid,

    /// Human-facing 10-digit number
    pub invoice_number: String,

    /// Issuing user
    pub sender_id: Uuid,

    pub customer_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total_amount: Decimal,
    pub discount_percentage: Decimal,
    pub discounted_amount: Decimal,

    /// Amount due after discount
    pub final_amount: Decimal,

    #[sqlx(try_from = "String")]
    pub status: InvoiceStatus,

    /// Currency code (ISO 4217)
    pub currency: String,

    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Line item belonging to one invoice.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceItem {
    pub item_id: Uuid,
    pub invoice_id: Uuid,

    /// Zero-based index in the submitted item list
    pub position: i32,

    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,

    /// Caller-supplied, not checked against quantity * unit_price
    pub total_price: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Links an invoice to the payment method it should be paid into.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentInformation {
    pub payment_info_id: Uuid,
    pub invoice_id: Uuid,
    pub payment_method_id: Uuid,
}

/// A validated invoice ready to be persisted in one transaction.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub invoice: Invoice,
    pub items: Vec<InvoiceItem>,
    pub payment_information: PaymentInformation,

    /// Written to both the invoice log and the sender's recent feed
    pub creation_activity: InvoiceActivity,
}

/// Full invoice view: the invoice joined with its sender, customer,
/// payment method, line items and activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDetails {
    pub invoice: Invoice,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone_number: String,
    pub sender_address: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone_number: String,

    /// `None` when the invoice has no payment information row
    pub payment_information: Option<PaymentMethod>,

    pub items: Vec<InvoiceItem>,

    /// Oldest first
    pub activities: Vec<InvoiceActivity>,
}

/// Count and summed final amount of invoices in one status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StatusTotal {
    pub total_amount: Decimal,
    pub count: i64,
}

/// Invoice metadata part of a creation request.
///
/// Identifiers and dates stay as strings here; they are parsed by the
/// invoice service so each failure maps to its own error kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceInfo {
    pub sender_id: String,
    pub issue_date: String,
    pub due_date: String,
    pub total_amount: Decimal,
    pub discount_percentage: Decimal,
    pub discounted_amount: Decimal,
    pub final_amount: Decimal,
    pub status: String,
    pub currency: String,
    #[serde(default)]
    pub notes: String,
}

/// Line item as submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItemInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Invoice creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoice {
    pub invoice: InvoiceInfo,
    pub customer_id: String,
    pub payment_method_id: String,
    pub invoice_items: Vec<InvoiceItemInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_statuses_parse() {
        for status in InvoiceStatus::ALL {
            assert_eq!(status.as_str().parse::<InvoiceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_wrong_case_rejected_with_exact_string() {
        match "PAID".parse::<InvoiceStatus>() {
            Err(AppError::InvalidStatus(raw)) => assert_eq!(raw, "PAID"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_rejected_with_exact_string() {
        match " paid ".parse::<InvoiceStatus>() {
            Err(AppError::InvalidStatus(raw)) => assert_eq!(raw, " paid "),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!("sent".parse::<InvoiceStatus>().is_err());
        assert!("".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&InvoiceStatus::Overdue).unwrap();
        assert_eq!(json, "\"overdue\"");
    }

    #[test]
    fn test_create_request_decodes_numeric_amounts() {
        let body = serde_json::json!({
            "invoice": {
                "sender_id": "9b2c1a7e-1f0a-4a43-8f3e-2b1d6f7c9a10",
                "issue_date": "2024-08-01",
                "due_date": "2024-08-31",
                "total_amount": 10000,
                "discount_percentage": 10,
                "discounted_amount": 1000.5,
                "final_amount": 9000,
                "status": "draft",
                "currency": "USD",
                "notes": "first"
            },
            "customer_id": "c1",
            "payment_method_id": "p1",
            "invoice_items": [
                { "name": "Design", "quantity": 2, "unit_price": 5000, "total_price": 10000 }
            ]
        });

        let request: CreateInvoice = serde_json::from_value(body).unwrap();
        assert_eq!(request.invoice.final_amount, Decimal::from(9000));
        assert_eq!(request.invoice_items.len(), 1);
        assert_eq!(request.invoice_items[0].description, "");
    }
}
