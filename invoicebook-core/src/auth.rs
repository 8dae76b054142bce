use crate::error::{AppError, AppResult};

/// Longest input bcrypt consumes; anything beyond this would be silently
/// ignored by the primitive.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes a plaintext password with bcrypt at the default cost.
///
/// Passwords longer than [`MAX_PASSWORD_BYTES`] are rejected with
/// `AppError::PasswordTooLong` instead of being truncated.
pub fn hash_password(password: &str) -> AppResult<String> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::PasswordTooLong);
    }

    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch; an error only when the hash itself is malformed.
pub fn verify_password(password: &str, hashed: &str) -> AppResult<bool> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    Ok(bcrypt::verify(password, hashed)?)
}
