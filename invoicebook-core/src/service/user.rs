use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::parse_id;
use crate::auth::hash_password;
use crate::error::AppResult;
use crate::models::{AddCustomer, AddPaymentMethod, Customer, CreateUser, PaymentMethod, User};
use crate::repository;

/// Registers a sender account. The password is bcrypt-hashed before storage.
///
/// # Errors
///
/// Returns `PasswordTooLong` for passwords over 72 bytes and
/// `ConstraintViolation` when the username or email is already taken.
pub async fn create_user(pool: &PgPool, request: CreateUser) -> AppResult<Uuid> {
    let password_hash = hash_password(&request.password)?;
    let now = Utc::now();

    let user = User {
        user_id: Uuid::new_v4(),
        username: request.username,
        email: request.email,
        password_hash,
        first_name: request.first_name,
        last_name: request.last_name,
        profile_picture_url: request.profile_picture_url,
        phone_number: request.phone_number,
        address: request.address,
        created_at: now,
        updated_at: now,
    };

    let user_id = repository::insert_user(pool, &user).await?;
    info!("Created user {}", user_id);
    Ok(user_id)
}

pub async fn add_customer(pool: &PgPool, request: AddCustomer) -> AppResult<Uuid> {
    let now = Utc::now();
    let customer = Customer {
        customer_id: Uuid::new_v4(),
        name: request.name,
        email: request.email,
        phone_number: request.phone_number,
        address: request.address,
        created_at: now,
        updated_at: now,
    };

    let customer_id = repository::insert_customer(pool, &customer).await?;
    info!("Created customer {}", customer_id);
    Ok(customer_id)
}

/// Adds a bank account for an existing user.
pub async fn add_payment_method(pool: &PgPool, request: AddPaymentMethod) -> AppResult<Uuid> {
    let user_id = parse_id("user id", &request.user_id)?;
    let now = Utc::now();

    let method = PaymentMethod {
        payment_method_id: Uuid::new_v4(),
        user_id,
        account_name: request.account_name,
        account_number: request.account_number,
        bank_name: request.bank_name,
        bank_address: request.bank_address,
        swift_code: request.swift_code,
        is_default: false,
        created_at: now,
        updated_at: now,
    };

    let payment_method_id = repository::insert_payment_method(pool, &method).await?;
    info!(
        "Added payment method {} for user {}",
        payment_method_id, user_id
    );
    Ok(payment_method_id)
}
