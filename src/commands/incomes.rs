// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::current_user;
use crate::models::{Income, IncomeDraft};
use crate::period::Period;
use crate::store::{RecordSource, SqliteStore};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, parse_id, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let user = current_user(&store, Utc::now())?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let i = draft_from(sub)?.into_income(user.id, Utc::now())?;
            store.insert_income(&i)?;
            println!(
                "Recorded income {} '{}' of {} on {}",
                i.id,
                i.description,
                fmt_money(&i.amount),
                i.received_on
            );
        }
        Some(("list", sub)) => list(&store, user.id, sub)?,
        Some(("show", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let i = store.income(user.id, id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &i)? {
                println!("{}", pretty_table(HEADERS, vec![row(&i)]));
            }
        }
        Some(("update", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let mut i = store.income(user.id, id)?;
            draft_from(sub)?.apply_to(&mut i)?;
            store.update_income(&i)?;
            println!("Updated income {}", i.id);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            store.delete_income(user.id, id)?;
            println!("Removed income {}", id);
        }
        _ => {}
    }
    Ok(())
}

const HEADERS: &[&str] = &["ID", "Received", "Description", "Amount", "Category", "Note"];

fn row(i: &Income) -> Vec<String> {
    vec![
        i.id.to_string(),
        i.received_on.to_string(),
        i.description.clone(),
        fmt_money(&i.amount),
        i.category.clone(),
        i.note.clone().unwrap_or_default(),
    ]
}

fn draft_from(sub: &clap::ArgMatches) -> Result<IncomeDraft> {
    Ok(IncomeDraft {
        description: sub.get_one::<String>("description").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        received_on: parse_date(sub.get_one::<String>("received").unwrap())?,
        category: sub
            .get_one::<String>("category")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        note: sub.get_one::<String>("note").map(|s| s.to_string()),
    })
}

pub fn list_incomes(source: &impl RecordSource, user: Uuid, period: &Period) -> Result<Vec<Income>> {
    source.incomes_in(user, period)
}

fn list(store: &SqliteStore, user: Uuid, sub: &clap::ArgMatches) -> Result<()> {
    let month = *sub.get_one::<u32>("month").unwrap();
    let year = *sub.get_one::<i32>("year").unwrap();
    let period = Period::month(month, year)?;
    let data = list_incomes(store, user, &period)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(HEADERS, data.iter().map(row).collect())
        );
    }
    Ok(())
}
