// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite persistence for users, categories, expenses and incomes.
//!
//! Every record query is scoped to one owning user. Period queries use the
//! half-open `[start, end)` range from [`Period`].

use crate::error::FinanceError;
use crate::models::{Category, Expense, Income, User};
use crate::period::Period;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Read access to a user's records, as consumed by summaries and charts.
pub trait RecordSource {
    fn expenses_in(&self, user: Uuid, period: &Period) -> Result<Vec<Expense>>;
    fn all_expenses(&self, user: Uuid) -> Result<Vec<Expense>>;
    fn incomes_in(&self, user: Uuid, period: &Period) -> Result<Vec<Income>>;
    fn all_incomes(&self, user: Uuid) -> Result<Vec<Income>>;
}

const EXPENSE_COLS: &str =
    "id, user_id, description, amount, due_date, paid, paid_at, category, note, created_at";
const INCOME_COLS: &str =
    "id, user_id, description, amount, received_on, category, note, created_at";

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    // Users

    pub fn insert_user(&self, user: &User) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO users(id, name, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id.to_string(),
                    user.name,
                    user.email,
                    user.password_hash,
                    user.created_at
                ],
            )
            .with_context(|| format!("Failed to save user '{}'", user.email))?;
        tracing::info!(user = %user.id, "user registered");
        Ok(())
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.query_user(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email=?1",
            email,
        )
    }

    pub fn user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.query_user(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id=?1",
            &id.to_string(),
        )
    }

    fn query_user(&self, sql: &str, key: &str) -> Result<Option<User>> {
        let raw = self
            .conn
            .query_row(sql, params![key], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, DateTime<Utc>>(4)?,
                ))
            })
            .optional()?;
        raw.map(|(id, name, email, password_hash, created_at)| -> Result<User> {
            Ok(User {
                id: parse_uuid(&id)?,
                name,
                email,
                password_hash,
                created_at,
            })
        })
        .transpose()
    }

    // Categories

    pub fn insert_category(&self, cat: &Category) -> Result<()> {
        let exists: Option<i32> = self
            .conn
            .query_row(
                "SELECT 1 FROM categories WHERE user_id=?1 AND name=?2",
                params![cat.user_id.to_string(), cat.name],
                |r| r.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(FinanceError::DuplicateCategory(cat.name.clone()).into());
        }
        self.conn.execute(
            "INSERT INTO categories(id, user_id, name, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                cat.id.to_string(),
                cat.user_id.to_string(),
                cat.name,
                cat.created_at
            ],
        )?;
        tracing::info!(user = %cat.user_id, category = %cat.name, "category created");
        Ok(())
    }

    pub fn categories(&self, user: Uuid) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name, created_at FROM categories WHERE user_id=?1 ORDER BY name ASC",
        )?;
        let mut rows = stmt.query(params![user.to_string()])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(Category {
                id: parse_uuid(&r.get::<_, String>(0)?)?,
                user_id: parse_uuid(&r.get::<_, String>(1)?)?,
                name: r.get(2)?,
                created_at: r.get(3)?,
            });
        }
        Ok(data)
    }

    pub fn delete_category(&self, user: Uuid, name: &str) -> Result<()> {
        let n = self.conn.execute(
            "DELETE FROM categories WHERE user_id=?1 AND name=?2",
            params![user.to_string(), name],
        )?;
        if n == 0 {
            return Err(FinanceError::category_not_found(name).into());
        }
        tracing::info!(user = %user, category = name, "category removed");
        Ok(())
    }

    // Expenses

    pub fn insert_expense(&self, e: &Expense) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO expenses(id, user_id, description, amount, due_date, paid, paid_at, category, note, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    e.id.to_string(),
                    e.user_id.to_string(),
                    e.description,
                    e.amount.to_string(),
                    e.due_date,
                    e.paid,
                    e.paid_at,
                    e.category,
                    e.note,
                    e.created_at
                ],
            )
            .context("Failed to save expense")?;
        tracing::info!(user = %e.user_id, expense = %e.id, "expense recorded");
        Ok(())
    }

    pub fn expense(&self, user: Uuid, id: Uuid) -> Result<Expense> {
        let sql = format!("SELECT {EXPENSE_COLS} FROM expenses WHERE user_id=?1 AND id=?2");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![user.to_string(), id.to_string()])?;
        match rows.next()? {
            Some(r) => expense_from_row(r),
            None => Err(FinanceError::expense_not_found(id).into()),
        }
    }

    pub fn update_expense(&self, e: &Expense) -> Result<()> {
        let n = self.conn.execute(
            "UPDATE expenses
             SET description=?1, amount=?2, due_date=?3, paid=?4, paid_at=?5, category=?6, note=?7
             WHERE user_id=?8 AND id=?9",
            params![
                e.description,
                e.amount.to_string(),
                e.due_date,
                e.paid,
                e.paid_at,
                e.category,
                e.note,
                e.user_id.to_string(),
                e.id.to_string()
            ],
        )?;
        if n == 0 {
            return Err(FinanceError::expense_not_found(e.id).into());
        }
        tracing::info!(user = %e.user_id, expense = %e.id, "expense updated");
        Ok(())
    }

    pub fn delete_expense(&self, user: Uuid, id: Uuid) -> Result<()> {
        let n = self.conn.execute(
            "DELETE FROM expenses WHERE user_id=?1 AND id=?2",
            params![user.to_string(), id.to_string()],
        )?;
        if n == 0 {
            return Err(FinanceError::expense_not_found(id).into());
        }
        tracing::info!(user = %user, expense = %id, "expense removed");
        Ok(())
    }

    fn query_expenses(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(args)?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(expense_from_row(r)?);
        }
        Ok(data)
    }

    // Incomes

    pub fn insert_income(&self, i: &Income) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO incomes(id, user_id, description, amount, received_on, category, note, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    i.id.to_string(),
                    i.user_id.to_string(),
                    i.description,
                    i.amount.to_string(),
                    i.received_on,
                    i.category,
                    i.note,
                    i.created_at
                ],
            )
            .context("Failed to save income")?;
        tracing::info!(user = %i.user_id, income = %i.id, "income recorded");
        Ok(())
    }

    pub fn income(&self, user: Uuid, id: Uuid) -> Result<Income> {
        let sql = format!("SELECT {INCOME_COLS} FROM incomes WHERE user_id=?1 AND id=?2");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![user.to_string(), id.to_string()])?;
        match rows.next()? {
            Some(r) => income_from_row(r),
            None => Err(FinanceError::income_not_found(id).into()),
        }
    }

    pub fn update_income(&self, i: &Income) -> Result<()> {
        let n = self.conn.execute(
            "UPDATE incomes
             SET description=?1, amount=?2, received_on=?3, category=?4, note=?5
             WHERE user_id=?6 AND id=?7",
            params![
                i.description,
                i.amount.to_string(),
                i.received_on,
                i.category,
                i.note,
                i.user_id.to_string(),
                i.id.to_string()
            ],
        )?;
        if n == 0 {
            return Err(FinanceError::income_not_found(i.id).into());
        }
        tracing::info!(user = %i.user_id, income = %i.id, "income updated");
        Ok(())
    }

    pub fn delete_income(&self, user: Uuid, id: Uuid) -> Result<()> {
        let n = self.conn.execute(
            "DELETE FROM incomes WHERE user_id=?1 AND id=?2",
            params![user.to_string(), id.to_string()],
        )?;
        if n == 0 {
            return Err(FinanceError::income_not_found(id).into());
        }
        tracing::info!(user = %user, income = %id, "income removed");
        Ok(())
    }

    fn query_incomes(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Income>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(args)?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(income_from_row(r)?);
        }
        Ok(data)
    }

    // Settings

    pub fn setting(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn clear_setting(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key=?1", params![key])?;
        Ok(())
    }
}

impl RecordSource for SqliteStore<'_> {
    fn expenses_in(&self, user: Uuid, period: &Period) -> Result<Vec<Expense>> {
        tracing::debug!(user = %user, start = %period.start, end = %period.end, "loading expenses");
        let sql = format!(
            "SELECT {EXPENSE_COLS} FROM expenses
             WHERE user_id=?1 AND due_date >= ?2 AND due_date < ?3
             ORDER BY due_date, created_at"
        );
        self.query_expenses(&sql, &[&user.to_string(), &period.start, &period.end])
    }

    fn all_expenses(&self, user: Uuid) -> Result<Vec<Expense>> {
        let sql = format!(
            "SELECT {EXPENSE_COLS} FROM expenses WHERE user_id=?1 ORDER BY due_date, created_at"
        );
        self.query_expenses(&sql, &[&user.to_string()])
    }

    fn incomes_in(&self, user: Uuid, period: &Period) -> Result<Vec<Income>> {
        tracing::debug!(user = %user, start = %period.start, end = %period.end, "loading incomes");
        let sql = format!(
            "SELECT {INCOME_COLS} FROM incomes
             WHERE user_id=?1 AND received_on >= ?2 AND received_on < ?3
             ORDER BY received_on, created_at"
        );
        self.query_incomes(&sql, &[&user.to_string(), &period.start, &period.end])
    }

    fn all_incomes(&self, user: Uuid) -> Result<Vec<Income>> {
        let sql = format!(
            "SELECT {INCOME_COLS} FROM incomes WHERE user_id=?1 ORDER BY received_on, created_at"
        );
        self.query_incomes(&sql, &[&user.to_string()])
    }
}

fn expense_from_row(r: &Row<'_>) -> Result<Expense> {
    let amount: String = r.get(3)?;
    Ok(Expense {
        id: parse_uuid(&r.get::<_, String>(0)?)?,
        user_id: parse_uuid(&r.get::<_, String>(1)?)?,
        description: r.get(2)?,
        amount: parse_amount(&amount)?,
        due_date: r.get::<_, NaiveDate>(4)?,
        paid: r.get(5)?,
        paid_at: r.get(6)?,
        category: r.get(7)?,
        note: r.get(8)?,
        created_at: r.get(9)?,
    })
}

fn income_from_row(r: &Row<'_>) -> Result<Income> {
    let amount: String = r.get(3)?;
    Ok(Income {
        id: parse_uuid(&r.get::<_, String>(0)?)?,
        user_id: parse_uuid(&r.get::<_, String>(1)?)?,
        description: r.get(2)?,
        amount: parse_amount(&amount)?,
        received_on: r.get::<_, NaiveDate>(4)?,
        category: r.get(5)?,
        note: r.get(6)?,
        created_at: r.get(7)?,
    })
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).with_context(|| format!("Invalid id '{}' in database", s))
}

fn parse_amount(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' in database", s))
}
