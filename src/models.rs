// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FinanceError, FinanceResult};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Organisational label owned by a user. Not referenced by expenses or incomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub paid: bool,
    /// Set if and only if `paid` is true.
    pub paid_at: Option<DateTime<Utc>>,
    pub category: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Derived status as of `today`.
    pub fn status(&self, today: NaiveDate) -> ExpenseStatus {
        crate::summary::classify(self.paid, self.due_date, today)
    }

    pub fn mark_paid(&mut self, now: DateTime<Utc>) {
        self.paid = true;
        self.paid_at = Some(now);
    }

    pub fn mark_unpaid(&mut self) {
        self.paid = false;
        self.paid_at = None;
    }

    /// Restores the paid/payment-date invariant after the flag was edited.
    pub fn normalize_payment(&mut self, now: DateTime<Utc>) {
        if self.paid {
            self.paid_at.get_or_insert(now);
        } else {
            self.paid_at = None;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Income {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub received_on: NaiveDate,
    pub category: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Editable fields of an expense, as submitted by the user.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub category: String,
    pub note: Option<String>,
}

impl ExpenseDraft {
    pub fn into_expense(self, user_id: Uuid, now: DateTime<Utc>) -> FinanceResult<Expense> {
        validate_amount(self.amount)?;
        let mut e = Expense {
            id: Uuid::new_v4(),
            user_id,
            description: self.description,
            amount: self.amount,
            due_date: self.due_date,
            paid: self.paid,
            paid_at: self.paid_at,
            category: self.category,
            note: self.note,
            created_at: now,
        };
        e.normalize_payment(now);
        Ok(e)
    }

    /// Replaces the editable fields of `target`; identity and ownership are kept.
    pub fn apply_to(self, target: &mut Expense, now: DateTime<Utc>) -> FinanceResult<()> {
        validate_amount(self.amount)?;
        target.description = self.description;
        target.amount = self.amount;
        target.due_date = self.due_date;
        target.paid = self.paid;
        target.paid_at = self.paid_at;
        target.category = self.category;
        target.note = self.note;
        target.normalize_payment(now);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct IncomeDraft {
    pub description: String,
    pub amount: Decimal,
    pub received_on: NaiveDate,
    pub category: String,
    pub note: Option<String>,
}

impl IncomeDraft {
    pub fn into_income(self, user_id: Uuid, now: DateTime<Utc>) -> FinanceResult<Income> {
        validate_amount(self.amount)?;
        Ok(Income {
            id: Uuid::new_v4(),
            user_id,
            description: self.description,
            amount: self.amount,
            received_on: self.received_on,
            category: self.category,
            note: self.note,
            created_at: now,
        })
    }

    pub fn apply_to(self, target: &mut Income) -> FinanceResult<()> {
        validate_amount(self.amount)?;
        target.description = self.description;
        target.amount = self.amount;
        target.received_on = self.received_on;
        target.category = self.category;
        target.note = self.note;
        Ok(())
    }
}

pub fn validate_amount(amount: Decimal) -> FinanceResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(FinanceError::InvalidAmount(amount));
    }
    Ok(amount)
}

/// Derived state of an expense. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseStatus {
    #[serde(rename = "Paga")]
    Paid,
    #[serde(rename = "Vencida")]
    Overdue,
    #[serde(rename = "A Vencer")]
    Upcoming,
}

impl ExpenseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseStatus::Paid => "Paga",
            ExpenseStatus::Overdue => "Vencida",
            ExpenseStatus::Upcoming => "A Vencer",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Balance sheet of one user for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total_expenses: Decimal,
    pub total_paid: Decimal,
    pub total_pending: Decimal,
    pub total_overdue: Decimal,
    pub total_incomes: Decimal,
    pub balance: Decimal,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusTotal {
    pub status: ExpenseStatus,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthTotal {
    pub month: u32,
    pub total: Decimal,
}
