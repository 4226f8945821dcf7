// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Password hashing and the local login session.
//!
//! The session is a user id plus an expiry instant kept in the `settings`
//! table. Record commands resolve their owner through [`current_user`].

use crate::error::{FinanceError, FinanceResult};
use crate::models::User;
use crate::store::SqliteStore;
use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

pub const SESSION_HOURS_ENV: &str = "SALDOZEN_SESSION_HOURS";
pub const DEFAULT_SESSION_HOURS: i64 = 24;
/// One year. Longer values fall back to the default.
pub const MAX_SESSION_HOURS: i64 = 24 * 366;

const SESSION_USER_KEY: &str = "session_user";
const SESSION_EXPIRES_KEY: &str = "session_expires_at";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

pub fn session_hours() -> i64 {
    parse_session_hours(std::env::var(SESSION_HOURS_ENV).ok().as_deref())
}

/// Session length from a raw setting; unset, non-numeric, non-positive or
/// out-of-range values give [`DEFAULT_SESSION_HOURS`].
pub fn parse_session_hours(raw: Option<&str>) -> i64 {
    raw.and_then(|h| h.trim().parse::<i64>().ok())
        .filter(|h| *h > 0 && *h <= MAX_SESSION_HOURS)
        .unwrap_or(DEFAULT_SESSION_HOURS)
}

/// Expiry instant of a session opened at `now`.
pub fn session_expiry(now: DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>> {
    Duration::try_hours(hours)
        .and_then(|d| now.checked_add_signed(d))
        .with_context(|| format!("Session length of {} hours is out of range", hours))
}

pub fn validate_email(email: &str) -> FinanceResult<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(FinanceError::InvalidEmail(email.to_string()))
    }
}

pub fn hash_password(password: &str) -> FinanceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| FinanceError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Validates and stores a new user. The e-mail must not be taken.
pub fn register(
    store: &SqliteStore,
    name: &str,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<User> {
    let name = name.trim();
    let email = email.trim().to_lowercase();
    if name.is_empty() {
        return Err(FinanceError::MissingField("name").into());
    }
    if email.is_empty() {
        return Err(FinanceError::MissingField("email").into());
    }
    if password.is_empty() {
        return Err(FinanceError::MissingField("password").into());
    }
    validate_email(&email)?;
    if store.user_by_email(&email)?.is_some() {
        return Err(FinanceError::DuplicateEmail(email).into());
    }
    let user = User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email,
        password_hash: hash_password(password)?,
        created_at: now,
    };
    store.insert_user(&user)?;
    Ok(user)
}

/// Checks credentials and opens a session. Unknown e-mail and wrong password
/// are reported identically.
pub fn login(store: &SqliteStore, email: &str, password: &str, now: DateTime<Utc>) -> Result<User> {
    let email = email.trim().to_lowercase();
    let user = match store.user_by_email(&email)? {
        Some(u) if verify_password(password, &u.password_hash) => u,
        _ => {
            tracing::warn!(email = %email, "login rejected");
            return Err(FinanceError::InvalidCredentials.into());
        }
    };
    let expires = session_expiry(now, session_hours())?;
    store.set_setting(SESSION_USER_KEY, &user.id.to_string())?;
    store.set_setting(SESSION_EXPIRES_KEY, &expires.to_rfc3339())?;
    tracing::info!(user = %user.id, expires = %expires, "session opened");
    Ok(user)
}

pub fn logout(store: &SqliteStore) -> Result<()> {
    store.clear_setting(SESSION_USER_KEY)?;
    store.clear_setting(SESSION_EXPIRES_KEY)?;
    tracing::info!("session closed");
    Ok(())
}

pub fn current_user(store: &SqliteStore, now: DateTime<Utc>) -> Result<User> {
    let Some(id) = store.setting(SESSION_USER_KEY)? else {
        return Err(FinanceError::NotLoggedIn.into());
    };
    let expires = store
        .setting(SESSION_EXPIRES_KEY)?
        .ok_or(FinanceError::NotLoggedIn)?;
    let expires = DateTime::parse_from_rfc3339(&expires)
        .with_context(|| format!("Corrupt session expiry '{}'", expires))?
        .with_timezone(&Utc);
    if now >= expires {
        return Err(FinanceError::SessionExpired.into());
    }
    let id = Uuid::parse_str(&id).with_context(|| format!("Corrupt session user '{}'", id))?;
    store
        .user_by_id(id)?
        .ok_or_else(|| FinanceError::user_not_found(id).into())
}
