// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::current_user;
use crate::models::{Expense, Income};
use crate::store::{RecordSource, SqliteStore};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let user = current_user(&store, Utc::now())?;
    match m.subcommand() {
        Some(("expenses", sub)) => {
            let data = store.all_expenses(user.id)?;
            let out = write(sub, EXPENSE_HEADER, &data, expense_row)?;
            tracing::info!(user = %user.id, records = data.len(), out = %out, "expenses exported");
            println!("Exported {} expenses to {}", data.len(), out);
        }
        Some(("incomes", sub)) => {
            let data = store.all_incomes(user.id)?;
            let out = write(sub, INCOME_HEADER, &data, income_row)?;
            tracing::info!(user = %user.id, records = data.len(), out = %out, "incomes exported");
            println!("Exported {} incomes to {}", data.len(), out);
        }
        _ => {}
    }
    Ok(())
}

const EXPENSE_HEADER: &[&str] = &[
    "id",
    "description",
    "amount",
    "due_date",
    "paid",
    "paid_at",
    "category",
    "note",
];

const INCOME_HEADER: &[&str] = &["id", "description", "amount", "received_on", "category", "note"];

fn expense_row(e: &Expense) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.description.clone(),
        e.amount.to_string(),
        e.due_date.to_string(),
        e.paid.to_string(),
        e.paid_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        e.category.clone(),
        e.note.clone().unwrap_or_default(),
    ]
}

fn income_row(i: &Income) -> Vec<String> {
    vec![
        i.id.to_string(),
        i.description.clone(),
        i.amount.to_string(),
        i.received_on.to_string(),
        i.category.clone(),
        i.note.clone().unwrap_or_default(),
    ]
}

fn write<T: Serialize>(
    sub: &clap::ArgMatches,
    header: &[&str],
    data: &[T],
    to_row: fn(&T) -> Vec<String>,
) -> Result<String> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().to_string();
    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(&out).with_context(|| format!("Cannot write {}", out))?;
            wtr.write_record(header)?;
            for item in data {
                wtr.write_record(to_row(item))?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(&out, serde_json::to_string_pretty(data)?)
                .with_context(|| format!("Cannot write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    Ok(out)
}
