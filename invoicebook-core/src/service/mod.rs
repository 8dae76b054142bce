//! Domain operations. Inputs are validated here before any write reaches
//! the repository; storage errors are classified into `AppError` kinds.

pub mod invoice;
pub mod user;


pub use invoice::{
    add_invoice_activity, create_invoice, get_invoice_activities, get_invoice_details,
    get_recent_activities, get_recent_invoices, get_total_by_status, prepare_invoice,
};
pub use user::{add_customer, add_payment_method, create_user};

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Parses an identifier, reporting which field was malformed.
pub fn parse_id(field: &'static str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidReference(field))
}
