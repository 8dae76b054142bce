use chrono::{NaiveDate, Utc};
use rand::Rng;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::models::{
    AddInvoiceActivity, CreateInvoice, Invoice, InvoiceActivity, InvoiceDetails, InvoiceItem,
    InvoiceStatus, NewInvoice, PaymentInformation, RecentActivity, StatusTotal,
};
use crate::pagination::Pagination;
use crate::repository;

/// Calendar date layout accepted for issue and due dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const CREATION_ACTIVITY_TITLE: &str = "Invoice Creation";

const INVOICE_NUMBER_MIN: u64 = 1_000_000_000;
const INVOICE_NUMBER_MAX: u64 = 9_999_999_999;

/// Draws a uniform random 10-digit invoice number.
///
/// Collisions are not checked here; the unique index on
/// `invoices.invoice_number` rejects them at insert time.
pub fn generate_invoice_number() -> String {
    rand::thread_rng()
        .gen_range(INVOICE_NUMBER_MIN..=INVOICE_NUMBER_MAX)
        .to_string()
}

/// `YYYY-MM-DD` with zero-padded fields. chrono alone also accepts signs,
/// padding and short years, so the byte layout is checked first.
fn has_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_date(field: &'static str, raw: &str) -> AppResult<NaiveDate> {
    if !has_date_shape(raw) {
        return Err(AppError::InvalidDateFormat(field));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| AppError::InvalidDateFormat(field))
}

/// Validates a creation request and assembles the rows to insert.
///
/// Checks run in a fixed order and the first failure is returned:
/// sender id, customer id, status, issue date, due date, payment method id.
/// Amounts are taken as supplied.
pub fn prepare_invoice(request: CreateInvoice) -> AppResult<NewInvoice> {
    let info = request.invoice;

    let sender_id = parse_id("sender id", &info.sender_id)?;
    let customer_id = parse_id("customer id", &request.customer_id)?;
    let status: InvoiceStatus = info.status.parse()?;
    let issue_date = parse_date("issue date", &info.issue_date)?;
    let due_date = parse_date("due date", &info.due_date)?;
    let payment_method_id = parse_id("payment method id", &request.payment_method_id)?;

    let invoice_id = Uuid::new_v4();
    let invoice_number = generate_invoice_number();
    let now = Utc::now();

    let items = request
        .invoice_items
        .into_iter()
        .zip(0..)
        .map(|(item, position)| InvoiceItem {
            item_id: Uuid::new_v4(),
            invoice_id,
            position,
            name: item.name,
            description: item.description,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let creation_activity = InvoiceActivity {
        activity_id: Uuid::new_v4(),
        invoice_id,
        user_id: sender_id,
        title: CREATION_ACTIVITY_TITLE.to_string(),
        description: format!("Created invoice {}", invoice_number),
        created_at: now,
    };

    let invoice = Invoice {
        invoice_id,
        invoice_number,
        sender_id,
        customer_id,
        issue_date,
        due_date,
        total_amount: info.total_amount,
        discount_percentage: info.discount_percentage,
        discounted_amount: info.discounted_amount,
        final_amount: info.final_amount,
        status,
        currency: info.currency,
        notes: info.notes,
        created_at: now,
        updated_at: now,
    };

    Ok(NewInvoice {
        invoice,
        items,
        payment_information: PaymentInformation {
            payment_info_id: Uuid::new_v4(),
            invoice_id,
            payment_method_id,
        },
        creation_activity,
    })
}

/// Creates an invoice atomically and returns its id.
///
/// # Errors
///
/// Validation errors from [`prepare_invoice`] are returned before any write.
/// Storage failures roll back the whole invoice.
pub async fn create_invoice(pool: &PgPool, request: CreateInvoice) -> AppResult<Uuid> {
    let new_invoice = prepare_invoice(request).map_err(|e| {
        warn!("Rejected invoice creation: {}", e);
        e
    })?;

    info!(
        "Creating invoice {} for sender {} with {} items",
        new_invoice.invoice.invoice_number,
        new_invoice.invoice.sender_id,
        new_invoice.items.len()
    );

    let invoice_id = repository::insert_invoice(pool, &new_invoice).await?;
    Ok(invoice_id)
}

pub async fn get_invoice_details(pool: &PgPool, invoice_id: Uuid) -> AppResult<InvoiceDetails> {
    repository::fetch_invoice_details(pool, invoice_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("invoice"),
            other => AppError::from(other),
        })
}

pub async fn get_total_by_status(pool: &PgPool, status: InvoiceStatus) -> AppResult<StatusTotal> {
    Ok(repository::total_by_status(pool, status).await?)
}

pub async fn get_recent_invoices(
    pool: &PgPool,
    sender_id: Uuid,
    page: Pagination,
) -> AppResult<Vec<Invoice>> {
    Ok(repository::recent_invoices(pool, sender_id, page.limit, page.offset()).await?)
}

pub async fn get_recent_activities(
    pool: &PgPool,
    user_id: Uuid,
    page: Pagination,
) -> AppResult<Vec<RecentActivity>> {
    Ok(repository::recent_activities(pool, user_id, page.limit, page.offset()).await?)
}

pub async fn get_invoice_activities(
    pool: &PgPool,
    user_id: Uuid,
    invoice_id: Uuid,
    page: Pagination,
) -> AppResult<Vec<InvoiceActivity>> {
    Ok(
        repository::invoice_activities(pool, user_id, invoice_id, page.limit, page.offset())
            .await?,
    )
}

/// Appends an activity to an invoice's log.
///
/// Unlike invoice creation, this does not write a recent-activity entry.
pub async fn add_invoice_activity(pool: &PgPool, request: AddInvoiceActivity) -> AppResult<Uuid> {
    let invoice_id = parse_id("invoice id", &request.invoice_id)?;
    let user_id = parse_id("user id", &request.user_id)?;

    let activity = InvoiceActivity {
        activity_id: Uuid::new_v4(),
        invoice_id,
        user_id,
        title: request.title,
        description: request.description,
        created_at: Utc::now(),
    };

    let activity_id = repository::insert_invoice_activity(pool, &activity).await?;
    info!("Recorded activity {} on invoice {}", activity_id, invoice_id);
    Ok(activity_id)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::models::{InvoiceInfo, InvoiceItemInput};
    use rust_decimal::Decimal;

    const SENDER: &str = "4f8e2d1c-6a7b-4c3d-9e0f-1a2b3c4d5e6f";
    const CUSTOMER: &str = "7c6b5a49-3827-4160-a5b4-c3d2e1f00912";
    const PAYMENT: &str = "0a1b2c3d-4e5f-4a7b-8c9d-0e1f2a3b4c5d";

    fn request() -> CreateInvoice {
        CreateInvoice {
            invoice: InvoiceInfo {
                sender_id: SENDER.to_string(),
                issue_date: "2024-08-01".to_string(),
                due_date: "2024-08-31".to_string(),
                total_amount: Decimal::from(10_000),
                discount_percentage: Decimal::from(10),
                discounted_amount: Decimal::from(1_000),
                final_amount: Decimal::from(9_000),
                status: "draft".to_string(),
                currency: "USD".to_string(),
                notes: "Thanks for your business".to_string(),
            },
            customer_id: CUSTOMER.to_string(),
            payment_method_id: PAYMENT.to_string(),
            invoice_items: vec![InvoiceItemInput {
                name: "Consulting".to_string(),
                description: "August retainer".to_string(),
                quantity: 2,
                unit_price: Decimal::from(5_000),
                total_price: Decimal::from(10_000),
            }],
        }
    }

    #[test]
    fn test_invoice_number_is_ten_digits() {
        for _ in 0..100 {
            let number = generate_invoice_number();
            assert_eq!(number.len(), 10);
            assert!(number.chars().all(|c| c.is_ascii_digit()));
            assert!(!number.starts_with('0'));
        }
    }

    #[test]
    fn test_prepare_valid_invoice() {
        let prepared = prepare_invoice(request()).unwrap();
        let invoice = &prepared.invoice;

        assert_eq!(invoice.sender_id.to_string(), SENDER);
        assert_eq!(invoice.customer_id.to_string(), CUSTOMER);
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.issue_date, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
        assert_eq!(invoice.final_amount, Decimal::from(9_000));
        assert_eq!(prepared.items.len(), 1);
        assert!(prepared.items.iter().all(|i| i.invoice_id == invoice.invoice_id));
        assert_eq!(prepared.payment_information.invoice_id, invoice.invoice_id);
        assert_eq!(prepared.payment_information.payment_method_id.to_string(), PAYMENT);
    }

    #[test]
    fn test_creation_activity_describes_invoice() {
        let prepared = prepare_invoice(request()).unwrap();
        let activity = &prepared.creation_activity;

        assert_eq!(activity.title, CREATION_ACTIVITY_TITLE);
        assert_eq!(activity.user_id, prepared.invoice.sender_id);
        assert_eq!(
            activity.description,
            format!("Created invoice {}", prepared.invoice.invoice_number)
        );
    }

    #[test]
    fn test_final_amount_not_recomputed() {
        let mut req = request();
        req.invoice.final_amount = Decimal::from(1);
        let prepared = prepare_invoice(req).unwrap();
        assert_eq!(prepared.invoice.final_amount, Decimal::from(1));
    }

    #[test]
    fn test_invalid_sender_reported_first() {
        let mut req = request();
        req.invoice.sender_id = "nope".to_string();
        req.customer_id = "nope".to_string();
        req.invoice.status = "nope".to_string();
        assert!(matches!(
            prepare_invoice(req),
            Err(AppError::InvalidReference("sender id"))
        ));
    }

    #[test]
    fn test_invalid_customer_before_status() {
        let mut req = request();
        req.customer_id = "nope".to_string();
        req.invoice.status = "nope".to_string();
        assert!(matches!(
            prepare_invoice(req),
            Err(AppError::InvalidReference("customer id"))
        ));
    }

    #[test]
    fn test_invalid_status_before_dates() {
        let mut req = request();
        req.invoice.status = "PAID".to_string();
        req.invoice.issue_date = "01/08/2024".to_string();
        match prepare_invoice(req) {
            Err(AppError::InvalidStatus(raw)) => assert_eq!(raw, "PAID"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_issue_date_before_due_date() {
        let mut req = request();
        req.invoice.issue_date = "2024/08/01".to_string();
        req.invoice.due_date = "tomorrow".to_string();
        assert!(matches!(
            prepare_invoice(req),
            Err(AppError::InvalidDateFormat("issue date"))
        ));
    }

    #[test]
    fn test_due_date_before_payment_method() {
        let mut req = request();
        req.invoice.due_date = "2024-13-01".to_string();
        req.payment_method_id = "nope".to_string();
        assert!(matches!(
            prepare_invoice(req),
            Err(AppError::InvalidDateFormat("due date"))
        ));
    }

    #[test]
    fn test_invalid_payment_method_last() {
        let mut req = request();
        req.payment_method_id = "nope".to_string();
        assert!(matches!(
            prepare_invoice(req),
            Err(AppError::InvalidReference("payment method id"))
        ));
    }

    #[test]
    fn test_loose_date_layouts_rejected() {
        for raw in ["2024-8-1", "2024-08-1", " 2024-08-01", "+2024-08-01", "24-08-01", "2024-08-01 "] {
            assert!(
                matches!(parse_date("issue date", raw), Err(AppError::InvalidDateFormat("issue date"))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_padded_dates_parse() {
        assert_eq!(
            parse_date("due date", "0999-01-09").unwrap(),
            NaiveDate::from_ymd_opt(999, 1, 9).unwrap()
        );
        assert!(matches!(
            parse_date("due date", "2024-02-30"),
            Err(AppError::InvalidDateFormat("due date"))
        ));
    }

    #[test]
    fn test_items_keep_submitted_order() {
        let mut req = request();
        let template = req.invoice_items[0].clone();
        req.invoice_items = ["Design", "Build", "Deploy"]
            .into_iter()
            .map(|name| InvoiceItemInput {
                name: name.to_string(),
                ..template.clone()
            })
            .collect();

        let prepared = prepare_invoice(req).unwrap();
        let positions: Vec<i32> = prepared.items.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(prepared.items[2].name, "Deploy");
    }

    #[test]
    fn test_no_items_allowed() {
        let mut req = request();
        req.invoice_items.clear();
        let prepared = prepare_invoice(req).unwrap();
        assert!(prepared.items.is_empty());
    }
}
