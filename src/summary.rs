// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Status derivation and period aggregation.
//!
//! Everything here is a pure function over already-fetched records. Inputs
//! may be unfiltered; each function keeps only the records whose relevant
//! date falls inside the given [`Period`].

use crate::models::{
    CategoryTotal, Expense, ExpenseStatus, Income, MonthTotal, StatusTotal, Summary,
};
use crate::period::Period;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// First match wins: paid, then overdue (`today` strictly after `due`), then upcoming.
pub fn classify(paid: bool, due: NaiveDate, today: NaiveDate) -> ExpenseStatus {
    if paid {
        ExpenseStatus::Paid
    } else if today > due {
        ExpenseStatus::Overdue
    } else {
        ExpenseStatus::Upcoming
    }
}

pub fn aggregate(
    expenses: &[Expense],
    incomes: &[Income],
    period: &Period,
    today: NaiveDate,
) -> Summary {
    let mut total_expenses = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut total_pending = Decimal::ZERO;
    let mut total_overdue = Decimal::ZERO;

    for e in expenses.iter().filter(|e| period.contains(e.due_date)) {
        total_expenses += e.amount;
        match e.status(today) {
            ExpenseStatus::Paid => total_paid += e.amount,
            ExpenseStatus::Overdue => total_overdue += e.amount,
            ExpenseStatus::Upcoming => total_pending += e.amount,
        }
    }

    let total_incomes: Decimal = incomes
        .iter()
        .filter(|i| period.contains(i.received_on))
        .map(|i| i.amount)
        .sum();

    Summary {
        total_expenses,
        total_paid,
        total_pending,
        total_overdue,
        total_incomes,
        balance: total_incomes - total_expenses,
        month: period.month_number(),
        year: period.year_number(),
    }
}

/// Expense totals per category, largest first. Equal totals fall back to name order.
pub fn totals_by_category(expenses: &[Expense], period: &Period) -> Vec<CategoryTotal> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for e in expenses.iter().filter(|e| period.contains(e.due_date)) {
        *agg.entry(e.category.as_str()).or_insert(Decimal::ZERO) += e.amount;
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    items.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    items
}

/// Expense totals per derived status, ordered by status label.
pub fn totals_by_status(
    expenses: &[Expense],
    period: &Period,
    today: NaiveDate,
) -> Vec<StatusTotal> {
    let mut agg: BTreeMap<&'static str, StatusTotal> = BTreeMap::new();
    for e in expenses.iter().filter(|e| period.contains(e.due_date)) {
        let status = e.status(today);
        agg.entry(status.label())
            .or_insert(StatusTotal {
                status,
                total: Decimal::ZERO,
            })
            .total += e.amount;
    }
    agg.into_values().collect()
}

pub fn expenses_by_month(expenses: &[Expense], period: &Period) -> Vec<MonthTotal> {
    by_month(expenses.iter().map(|e| (e.due_date, e.amount)), period)
}

pub fn incomes_by_month(incomes: &[Income], period: &Period) -> Vec<MonthTotal> {
    by_month(incomes.iter().map(|i| (i.received_on, i.amount)), period)
}

fn by_month(
    records: impl Iterator<Item = (NaiveDate, Decimal)>,
    period: &Period,
) -> Vec<MonthTotal> {
    let mut agg: BTreeMap<u32, Decimal> = BTreeMap::new();
    for (date, amount) in records.filter(|(d, _)| period.contains(*d)) {
        *agg.entry(date.month()).or_insert(Decimal::ZERO) += amount;
    }
    agg.into_iter()
        .map(|(month, total)| MonthTotal { month, total })
        .collect()
}
