// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::current_user;
use crate::error::FinanceError;
use crate::models::Category;
use crate::store::SqliteStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let user = current_user(&store, Utc::now())?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if name.is_empty() {
                return Err(FinanceError::MissingField("name").into());
            }
            store.insert_category(&Category {
                id: Uuid::new_v4(),
                user_id: user.id,
                name: name.to_string(),
                created_at: Utc::now(),
            })?;
            println!("Added category '{}'", name);
        }
        Some(("list", sub)) => {
            let cats = store.categories(user.id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats.into_iter().map(|c| vec![c.name]).collect();
                println!("{}", pretty_table(&["Category"], data));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            store.delete_category(user.id, name)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
