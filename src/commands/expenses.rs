// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::current_user;
use crate::models::{Expense, ExpenseDraft, ExpenseStatus};
use crate::period::Period;
use crate::store::{RecordSource, SqliteStore};
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_id, parse_instant, pretty_table,
    today,
};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let user = current_user(&store, Utc::now())?;
    match m.subcommand() {
        Some(("add", sub)) => add(&store, user.id, sub)?,
        Some(("list", sub)) => list(&store, user.id, sub)?,
        Some(("show", sub)) => show(&store, user.id, sub)?,
        Some(("update", sub)) => update(&store, user.id, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            store.delete_expense(user.id, id)?;
            println!("Removed expense {}", id);
        }
        Some(("pay", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let e = pay(&store, user.id, id)?;
            println!("Marked '{}' as paid", e.description);
        }
        Some(("unpay", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let e = unpay(&store, user.id, id)?;
            println!("Marked '{}' as unpaid", e.description);
        }
        _ => {}
    }
    Ok(())
}

fn draft_from(sub: &clap::ArgMatches) -> Result<ExpenseDraft> {
    let paid_at = sub
        .get_one::<String>("paid_on")
        .map(|s| parse_instant(s))
        .transpose()?;
    Ok(ExpenseDraft {
        description: sub.get_one::<String>("description").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        due_date: parse_date(sub.get_one::<String>("due").unwrap())?,
        paid: sub.get_flag("paid") || paid_at.is_some(),
        paid_at,
        category: sub
            .get_one::<String>("category")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        note: sub.get_one::<String>("note").map(|s| s.to_string()),
    })
}

fn add(store: &SqliteStore, user: Uuid, sub: &clap::ArgMatches) -> Result<()> {
    let e = draft_from(sub)?.into_expense(user, Utc::now())?;
    store.insert_expense(&e)?;
    println!(
        "Recorded expense {} '{}' of {} due {}",
        e.id,
        e.description,
        fmt_money(&e.amount),
        e.due_date
    );
    Ok(())
}

fn update(store: &SqliteStore, user: Uuid, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let mut e = store.expense(user, id)?;
    draft_from(sub)?.apply_to(&mut e, Utc::now())?;
    store.update_expense(&e)?;
    println!("Updated expense {}", e.id);
    Ok(())
}

pub fn pay(store: &SqliteStore, user: Uuid, id: Uuid) -> Result<Expense> {
    let mut e = store.expense(user, id)?;
    e.mark_paid(Utc::now());
    store.update_expense(&e)?;
    Ok(e)
}

pub fn unpay(store: &SqliteStore, user: Uuid, id: Uuid) -> Result<Expense> {
    let mut e = store.expense(user, id)?;
    e.mark_unpaid();
    store.update_expense(&e)?;
    Ok(e)
}

/// An expense with its status derived for display.
#[derive(Debug, Serialize)]
pub struct ExpenseView {
    #[serde(flatten)]
    pub expense: Expense,
    pub status: ExpenseStatus,
}

impl ExpenseView {
    fn new(expense: Expense, today: NaiveDate) -> Self {
        let status = expense.status(today);
        Self { expense, status }
    }
}

/// Expenses of `user`, restricted to `period` when given, by due date.
pub fn list_expenses(
    source: &impl RecordSource,
    user: Uuid,
    period: Option<&Period>,
    today: NaiveDate,
) -> Result<Vec<ExpenseView>> {
    let data = match period {
        Some(p) => source.expenses_in(user, p)?,
        None => source.all_expenses(user)?,
    };
    Ok(data
        .into_iter()
        .map(|e| ExpenseView::new(e, today))
        .collect())
}

fn list(store: &SqliteStore, user: Uuid, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period = match (sub.get_one::<u32>("month"), sub.get_one::<i32>("year")) {
        (Some(m), Some(y)) => Some(Period::month(*m, *y)?),
        _ => None,
    };
    let data = list_expenses(store, user, period.as_ref(), today())?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|v| {
                vec![
                    v.expense.id.to_string(),
                    v.expense.due_date.to_string(),
                    v.expense.description.clone(),
                    fmt_money(&v.expense.amount),
                    v.expense.category.clone(),
                    v.status.to_string(),
                    v.expense.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Due", "Description", "Amount", "Category", "Status", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

fn show(store: &SqliteStore, user: Uuid, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let view = ExpenseView::new(store.expense(user, id)?, today());
    if !maybe_print_json(json_flag, jsonl_flag, &view)? {
        let e = &view.expense;
        let rows = vec![
            vec!["ID".into(), e.id.to_string()],
            vec!["Description".into(), e.description.clone()],
            vec!["Amount".into(), fmt_money(&e.amount)],
            vec!["Due".into(), e.due_date.to_string()],
            vec!["Status".into(), view.status.to_string()],
            vec![
                "Paid at".into(),
                e.paid_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ],
            vec!["Category".into(), e.category.clone()],
            vec!["Note".into(), e.note.clone().unwrap_or_default()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}
