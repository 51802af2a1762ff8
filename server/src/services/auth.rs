// server/src/services/auth.rs

//! Authentication: password hashing/verification and the signup/signin
//! flows against the user directory.

use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use chrono::Utc;
use eshop::models::{Role, User};
use eshop::stores::UserStore;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Hashes a plain-text password using Argon2 with a random salt.
#[instrument(name = "auth::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  let argon2 = Argon2::default();

  match argon2.hash_password(password.as_bytes(), &salt) {
    Ok(hash) => Ok(hash.to_string()),
    Err(err) => {
      error!(error = %err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", err)))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
#[instrument(name = "auth::verify_password", skip_all, err(Display))]
pub fn verify_password(stored_hash: &str, provided_password: &str) -> Result<bool, AppError> {
  if stored_hash.is_empty() || provided_password.is_empty() {
    return Err(AppError::Auth("Invalid credentials.".to_string()));
  }

  let parsed_hash = PasswordHash::new(stored_hash).map_err(|err| {
    error!(error = %err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: passwords do not match.");
      Ok(false)
    }
    Err(err) => {
      error!(error = %err, "Argon2 password verification process errored.");
      Err(AppError::Internal(format!("Password verification process failed: {}", err)))
    }
  }
}

/// Registers a new account with the chosen role. Does not sign the user
/// in; the client is expected to proceed to the sign-in flow.
#[instrument(name = "auth::signup", skip(users, password), fields(%email, ?role), err(Display))]
pub async fn signup(users: &dyn UserStore, email: &str, password: &str, role: Role) -> Result<User, AppError> {
  let email = email.trim();
  if email.is_empty() || !email.contains('@') {
    return Err(AppError::Validation("A valid email address is required.".to_string()));
  }

  let user = User {
    id: Uuid::new_v4(),
    email: email.to_string(),
    password_hash: hash_password(password)?,
    role,
    created_at: Utc::now(),
  };
  users.insert_user(user.clone()).await?;
  debug!(user_id = %user.id, "account created");
  Ok(user)
}

/// Verifies credentials and returns the matching user.
#[instrument(name = "auth::signin", skip(users, password), fields(%email), err(Display))]
pub async fn signin(users: &dyn UserStore, email: &str, password: &str) -> Result<User, AppError> {
  let user = users
    .find_by_email(email.trim())
    .await?
    .ok_or_else(|| AppError::Auth("Failed to login. Please check your credentials.".to_string()))?;

  if verify_password(&user.password_hash, password)? {
    Ok(user)
  } else {
    warn!(user_id = %user.id, "sign-in rejected: wrong password");
    Err(AppError::Auth("Failed to login. Please check your credentials.".to_string()))
  }
}
