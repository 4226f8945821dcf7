// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::current_user;
use crate::models::Summary;
use crate::period::Period;
use crate::store::{RecordSource, SqliteStore};
use crate::summary::aggregate;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, today};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use uuid::Uuid;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let user = current_user(&store, Utc::now())?;
    let month = *sub.get_one::<u32>("month").unwrap();
    let year = *sub.get_one::<i32>("year").unwrap();

    let s = monthly_summary(&store, user.id, month, year, today())?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Expenses".into(), fmt_money(&s.total_expenses)],
            vec!["  Paid".into(), fmt_money(&s.total_paid)],
            vec!["  Pending".into(), fmt_money(&s.total_pending)],
            vec!["  Overdue".into(), fmt_money(&s.total_overdue)],
            vec!["Incomes".into(), fmt_money(&s.total_incomes)],
            vec!["Balance".into(), fmt_money(&s.balance)],
        ];
        let title = format!("{:02}/{}", s.month, s.year);
        println!("{}", pretty_table(&[title.as_str(), "Total"], rows));
    }
    Ok(())
}

/// Loads the month's records for `user` and aggregates them as of `today`.
pub fn monthly_summary(
    source: &impl RecordSource,
    user: Uuid,
    month: u32,
    year: i32,
    today: NaiveDate,
) -> Result<Summary> {
    let period = Period::month(month, year)?;
    let expenses = source.expenses_in(user, &period)?;
    let incomes = source.incomes_in(user, &period)?;
    tracing::debug!(
        user = %user,
        expenses = expenses.len(),
        incomes = incomes.len(),
        "aggregating month {:02}/{}",
        month,
        year
    );
    Ok(aggregate(&expenses, &incomes, &period, today))
}
