// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth;
use crate::store::SqliteStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("register", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let email = sub.get_one::<String>("email").unwrap();
            let password = password_from(sub)?;
            let user = auth::register(&store, name, email, &password, Utc::now())?;
            println!("Registered {} <{}>", user.name, user.email);
        }
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = password_from(sub)?;
            let user = auth::login(&store, email, &password, Utc::now())?;
            println!(
                "Logged in as {} for {}h",
                user.email,
                auth::session_hours()
            );
        }
        Some(("logout", _)) => {
            auth::logout(&store)?;
            println!("Logged out");
        }
        Some(("whoami", sub)) => {
            let user = auth::current_user(&store, Utc::now())?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &user)? {
                let rows = vec![vec![
                    user.id.to_string(),
                    user.name.clone(),
                    user.email.clone(),
                    user.created_at.to_rfc3339(),
                ]];
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "E-mail", "Created"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn password_from(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("password") {
        Some(p) => Ok(p.clone()),
        None => rpassword::prompt_password("Password: ").context("Failed to read password"),
    }
}
