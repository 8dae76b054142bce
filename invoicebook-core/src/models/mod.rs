pub mod activity;
pub mod customer;
pub mod invoice;
pub mod payment;
pub mod user;

pub use activity::{AddInvoiceActivity, InvoiceActivity, RecentActivity};
pub use customer::{AddCustomer, Customer};
pub use invoice::{
    CreateInvoice, Invoice, InvoiceDetails, InvoiceInfo, InvoiceItem, InvoiceItemInput,
    InvoiceStatus, NewInvoice, PaymentInformation, StatusTotal,
};
pub use payment::{AddPaymentMethod, PaymentMethod};
pub use user::{CreateUser, User};

use crate::error::{AppError, AppResult};

/// Rejects empty required string fields.
pub(crate) fn require(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(())
}
