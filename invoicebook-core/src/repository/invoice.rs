use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{
    Invoice, InvoiceActivity, InvoiceDetails, InvoiceItem, InvoiceStatus, NewInvoice,
    PaymentInformation, PaymentMethod, StatusTotal,
};

/// Persists an invoice with its items, payment information and creation
/// activity in a single transaction.
///
/// Any failure returns early and drops the transaction, which rolls back
/// every insert made so far.
pub async fn insert_invoice(pool: &PgPool, new_invoice: &NewInvoice) -> Result<Uuid, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let invoice_id = insert_invoice_row(&mut tx, &new_invoice.invoice).await?;

    for item in &new_invoice.items {
        insert_item(&mut tx, invoice_id, item).await?;
    }

    insert_payment_information(&mut tx, invoice_id, &new_invoice.payment_information).await?;
    insert_creation_activity(&mut tx, invoice_id, &new_invoice.creation_activity).await?;

    tx.commit().await?;

    Ok(invoice_id)
}

async fn insert_invoice_row(
    tx: &mut Transaction<'_, Postgres>,
    invoice: &Invoice,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO invoices (
            invoice_id, invoice_number, sender_id, customer_id, issue_date, due_date,
            total_amount, discount_percentage, discounted_amount, final_amount, status,
            currency, notes
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING invoice_id
        "#,
    )
    .bind(invoice.invoice_id)
    .bind(&invoice.invoice_number)
    .bind(invoice.sender_id)
    .bind(invoice.customer_id)
    .bind(invoice.issue_date)
    .bind(invoice.due_date)
    .bind(invoice.total_amount)
    .bind(invoice.discount_percentage)
    .bind(invoice.discounted_amount)
    .bind(invoice.final_amount)
    .bind(invoice.status.as_str())
    .bind(&invoice.currency)
    .bind(&invoice.notes)
    .fetch_one(&mut **tx)
    .await
}

async fn insert_item(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
    item: &InvoiceItem,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO invoice_items (
            item_id, invoice_id, position, name, description, quantity, unit_price,
            total_price
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(item.item_id)
    .bind(invoice_id)
    .bind(item.position)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.quantity)
    .bind(item.unit_price)
    .bind(item.total_price)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_payment_information(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
    info: &PaymentInformation,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO payment_information (payment_info_id, invoice_id, payment_method_id)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(info.payment_info_id)
    .bind(invoice_id)
    .bind(info.payment_method_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Writes the activity to the invoice log and mirrors it, under the same
/// id, into the user's recent feed.
async fn insert_creation_activity(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
    activity: &InvoiceActivity,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO invoice_activities (activity_id, invoice_id, user_id, title, description)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(activity.activity_id)
    .bind(invoice_id)
    .bind(activity.user_id)
    .bind(&activity.title)
    .bind(&activity.description)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO recent_activities (activity_id, user_id, title, description)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(activity.activity_id)
    .bind(activity.user_id)
    .bind(&activity.title)
    .bind(&activity.description)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Invoice joined with sender, customer and the optional payment method.
#[derive(Debug, FromRow)]
struct InvoiceDetailsRow {
    #[sqlx(flatten)]
    invoice: Invoice,
    sender_name: String,
    sender_email: String,
    sender_phone_number: String,
    sender_address: String,
    customer_name: String,
    customer_email: String,
    customer_phone_number: String,
    payment_method_id: Option<Uuid>,
    payment_user_id: Option<Uuid>,
    account_name: Option<String>,
    account_number: Option<String>,
    bank_name: Option<String>,
    bank_address: Option<String>,
    swift_code: Option<String>,
    is_default: Option<bool>,
    payment_created_at: Option<DateTime<Utc>>,
    payment_updated_at: Option<DateTime<Utc>>,
}

impl InvoiceDetailsRow {
    fn payment_method(&self) -> Option<PaymentMethod> {
        Some(PaymentMethod {
            payment_method_id: self.payment_method_id?,
            user_id: self.payment_user_id?,
            account_name: self.account_name.clone()?,
            account_number: self.account_number.clone()?,
            bank_name: self.bank_name.clone()?,
            bank_address: self.bank_address.clone()?,
            swift_code: self.swift_code.clone()?,
            is_default: self.is_default.unwrap_or(false),
            created_at: self.payment_created_at?,
            updated_at: self.payment_updated_at?,
        })
    }
}

/// Loads an invoice with everything attached to it.
///
/// Returns `sqlx::Error::RowNotFound` when the invoice does not exist. A
/// missing payment information row is not an error; the payment method is
/// `None` instead.
pub async fn fetch_invoice_details(
    pool: &PgPool,
    invoice_id: Uuid,
) -> Result<InvoiceDetails, sqlx::Error> {
    let row = sqlx::query_as::<_, InvoiceDetailsRow>(
        r#"
        SELECT
            i.invoice_id, i.invoice_number, i.sender_id, i.customer_id, i.issue_date, i.due_date,
            i.total_amount, i.discount_percentage, i.discounted_amount, i.final_amount, i.status,
            i.currency, i.notes, i.created_at, i.updated_at,
            s.first_name || ' ' || s.last_name AS sender_name,
            s.email AS sender_email,
            s.phone_number AS sender_phone_number,
            s.address AS sender_address,
            c.name AS customer_name,
            c.email AS customer_email,
            c.phone_number AS customer_phone_number,
            pm.payment_method_id, pm.user_id AS payment_user_id, pm.account_name,
            pm.account_number, pm.bank_name, pm.bank_address, pm.swift_code, pm.is_default,
            pm.created_at AS payment_created_at, pm.updated_at AS payment_updated_at
        FROM invoices i
        JOIN users s ON i.sender_id = s.user_id
        JOIN customers c ON i.customer_id = c.customer_id
        LEFT JOIN payment_information pi ON i.invoice_id = pi.invoice_id
        LEFT JOIN user_payment_methods pm ON pi.payment_method_id = pm.payment_method_id
        WHERE i.invoice_id = $1
        LIMIT 1
        "#,
    )
    .bind(invoice_id)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, InvoiceItem>(
        r#"
        SELECT item_id, invoice_id, position, name, description, quantity, unit_price,
               total_price, created_at, updated_at
        FROM invoice_items
        WHERE invoice_id = $1
        ORDER BY position
        "#,
    )
    .bind(invoice_id)
    .fetch_all(pool)
    .await?;

    let activities = sqlx::query_as::<_, InvoiceActivity>(
        r#"
        SELECT activity_id, invoice_id, user_id, title, description, created_at
        FROM invoice_activities
        WHERE invoice_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(invoice_id)
    .fetch_all(pool)
    .await?;

    let payment_information = row.payment_method();

    Ok(InvoiceDetails {
        invoice: row.invoice,
        sender_name: row.sender_name,
        sender_email: row.sender_email,
        sender_phone_number: row.sender_phone_number,
        sender_address: row.sender_address,
        customer_name: row.customer_name,
        customer_email: row.customer_email,
        customer_phone_number: row.customer_phone_number,
        payment_information,
        items,
        activities,
    })
}

/// Number of invoices in `status` and the sum of their final amounts.
/// An empty match yields zero for both.
pub async fn total_by_status<'e, E>(
    executor: E,
    status: InvoiceStatus,
) -> Result<StatusTotal, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, StatusTotal>(
        r#"
        SELECT COALESCE(SUM(final_amount), 0) AS total_amount, COUNT(*) AS count
        FROM invoices
        WHERE status = $1
        "#,
    )
    .bind(status.as_str())
    .fetch_one(executor)
    .await
}

/// A sender's invoices, newest first.
pub async fn recent_invoices(
    pool: &PgPool,
    sender_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        r#"
        SELECT invoice_id, invoice_number, sender_id, customer_id, issue_date, due_date,
               total_amount, discount_percentage, discounted_amount, final_amount, status,
               currency, notes, created_at, updated_at
        FROM invoices
        WHERE sender_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(sender_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
