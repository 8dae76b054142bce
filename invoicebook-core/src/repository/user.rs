use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Customer, PaymentMethod, User};

/// Inserts a user and returns its id. The password must already be hashed.
pub async fn insert_user(pool: &PgPool, user: &User) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (
            user_id, username, email, password, first_name, last_name,
            profile_picture_url, phone_number, address
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING user_id
        "#,
    )
    .bind(user.user_id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.profile_picture_url)
    .bind(&user.phone_number)
    .bind(&user.address)
    .fetch_one(pool)
    .await
}

pub async fn insert_customer(pool: &PgPool, customer: &Customer) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO customers (customer_id, name, email, phone_number, address)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING customer_id
        "#,
    )
    .bind(customer.customer_id)
    .bind(&customer.name)
    .bind(&customer.email)
    .bind(&customer.phone_number)
    .bind(&customer.address)
    .fetch_one(pool)
    .await
}

/// Inserts a payment method. Fails with a foreign-key violation when the
/// owning user does not exist.
pub async fn insert_payment_method(
    pool: &PgPool,
    method: &PaymentMethod,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO user_payment_methods (
            payment_method_id, user_id, account_name, account_number,
            bank_name, bank_address, swift_code, is_default
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING payment_method_id
        "#,
    )
    .bind(method.payment_method_id)
    .bind(method.user_id)
    .bind(&method.account_name)
    .bind(&method.account_number)
    .bind(&method.bank_name)
    .bind(&method.bank_address)
    .bind(&method.swift_code)
    .bind(method.is_default)
    .fetch_one(pool)
    .await
}
