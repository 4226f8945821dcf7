// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the record model, the period/summary core and sessions.
///
/// Storage and command code wraps these in `anyhow` on the way out.
#[derive(Error, Debug, PartialEq)]
pub enum FinanceError {
    #[error("Invalid period {month}/{year}: month must be 1-12 and year positive")]
    InvalidPeriod { month: u32, year: i32 },

    #[error("Invalid year {0}: must be positive")]
    InvalidYear(i32),

    #[error("Amount must be greater than zero (got {0})")]
    InvalidAmount(Decimal),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Not logged in; run `saldozen user login` first")]
    NotLoggedIn,

    #[error("Session expired; run `saldozen user login` again")]
    SessionExpired,

    #[error("Wrong e-mail or password")]
    InvalidCredentials,

    #[error("Invalid e-mail address '{0}'")]
    InvalidEmail(String),

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("E-mail '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl FinanceError {
    pub fn expense_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Expense",
            id: id.to_string(),
        }
    }

    pub fn income_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Income",
            id: id.to_string(),
        }
    }

    pub fn category_not_found(name: impl ToString) -> Self {
        Self::NotFound {
            entity: "Category",
            id: name.to_string(),
        }
    }

    pub fn user_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "User",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type FinanceResult<T> = Result<T, FinanceError>;
