// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::current_user;
use crate::models::{CategoryTotal, MonthTotal, StatusTotal};
use crate::period::Period;
use crate::store::{RecordSource, SqliteStore};
use crate::summary::{expenses_by_month, incomes_by_month, totals_by_category, totals_by_status};
use crate::utils::{fmt_money, maybe_print_json, pretty_table, today};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use uuid::Uuid;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let user = current_user(&store, Utc::now())?;
    match m.subcommand() {
        Some(("category", sub)) => {
            let data = by_category(&store, user.id, month_of(sub)?)?;
            let rows = data
                .iter()
                .map(|c| vec![c.category.clone(), fmt_money(&c.total)])
                .collect();
            emit(sub, &data, &["Category", "Total"], rows)?;
        }
        Some(("status", sub)) => {
            let data = by_status(&store, user.id, month_of(sub)?, today())?;
            let rows = data
                .iter()
                .map(|s| vec![s.status.to_string(), fmt_money(&s.total)])
                .collect();
            emit(sub, &data, &["Status", "Total"], rows)?;
        }
        Some(("yearly", sub)) => {
            let year = *sub.get_one::<i32>("year").unwrap();
            let data = yearly(&store, user.id, year, sub.get_flag("incomes"))?;
            let rows = data
                .iter()
                .map(|t| vec![format!("{:02}", t.month), fmt_money(&t.total)])
                .collect();
            emit(sub, &data, &["Month", "Total"], rows)?;
        }
        _ => {}
    }
    Ok(())
}

fn month_of(sub: &clap::ArgMatches) -> Result<Period> {
    let month = *sub.get_one::<u32>("month").unwrap();
    let year = *sub.get_one::<i32>("year").unwrap();
    Ok(Period::month(month, year)?)
}

fn emit<T: serde::Serialize>(
    sub: &clap::ArgMatches,
    data: &T,
    headers: &[&str],
    rows: Vec<Vec<String>>,
) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), data)? {
        println!("{}", pretty_table(headers, rows));
    }
    Ok(())
}

pub fn by_category(
    source: &impl RecordSource,
    user: Uuid,
    period: Period,
) -> Result<Vec<CategoryTotal>> {
    let expenses = source.expenses_in(user, &period)?;
    Ok(totals_by_category(&expenses, &period))
}

pub fn by_status(
    source: &impl RecordSource,
    user: Uuid,
    period: Period,
    today: NaiveDate,
) -> Result<Vec<StatusTotal>> {
    let expenses = source.expenses_in(user, &period)?;
    Ok(totals_by_status(&expenses, &period, today))
}

/// Per-month totals of the year, expenses by due date or incomes by receipt date.
pub fn yearly(
    source: &impl RecordSource,
    user: Uuid,
    year: i32,
    incomes: bool,
) -> Result<Vec<MonthTotal>> {
    let period = Period::year(year)?;
    if incomes {
        let data = source.incomes_in(user, &period)?;
        Ok(incomes_by_month(&data, &period))
    } else {
        let data = source.expenses_in(user, &period)?;
        Ok(expenses_by_month(&data, &period))
    }
}
