//! SQL access for every table. Functions take either the shared pool or an
//! open transaction and return raw `sqlx::Error`s; classification into
//! domain error kinds happens in the service layer.

pub mod activity;
pub mod invoice;
pub mod user;

pub use activity::{insert_invoice_activity, invoice_activities, recent_activities};
pub use invoice::{fetch_invoice_details, insert_invoice, recent_invoices, total_by_status};
pub use user::{insert_customer, insert_payment_method, insert_user};
