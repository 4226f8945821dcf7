// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Returns `[issue, detail]` pairs for every stored record that breaks a
/// model invariant.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Payment date must be present exactly when the expense is paid
    let mut stmt = conn.prepare(
        "SELECT id, paid FROM expenses
         WHERE (paid=1 AND paid_at IS NULL) OR (paid=0 AND paid_at IS NOT NULL)
         ORDER BY due_date",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: String = r.get(0)?;
        let paid: bool = r.get(1)?;
        let issue = if paid {
            "paid_without_date"
        } else {
            "unpaid_with_date"
        };
        rows.push(vec![issue.into(), id]);
    }

    // 2) Amounts must parse and be positive
    for table in ["expenses", "incomes"] {
        let mut stmt = conn.prepare(&format!("SELECT id, amount FROM {table} ORDER BY id"))?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: String = r.get(0)?;
            let amount: String = r.get(1)?;
            match amount.parse::<Decimal>() {
                Ok(d) if d > Decimal::ZERO => {}
                Ok(_) => rows.push(vec![
                    "non_positive_amount".into(),
                    format!("{table} {id} ({amount})"),
                ]),
                Err(_) => rows.push(vec![
                    "unparsable_amount".into(),
                    format!("{table} {id} ({amount})"),
                ]),
            }
        }
    }

    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        tracing::warn!(issues = rows.len(), "doctor found inconsistencies");
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
