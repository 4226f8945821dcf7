// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use saldozen::models::{Expense, ExpenseStatus, Income};
use saldozen::period::Period;
use saldozen::summary::{
    aggregate, classify, expenses_by_month, incomes_by_month, totals_by_category,
    totals_by_status,
};
use uuid::Uuid;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn expense(amount: &str, due: NaiveDate, paid: bool, category: &str) -> Expense {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    Expense {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        description: format!("{} {}", category, amount),
        amount: d(amount),
        due_date: due,
        paid,
        paid_at: paid.then_some(created),
        category: category.to_string(),
        note: None,
        created_at: created,
    }
}

fn income(amount: &str, on: NaiveDate) -> Income {
    Income {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        description: "Salary".into(),
        amount: d(amount),
        received_on: on,
        category: "Work".into(),
        note: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn paid_wins_regardless_of_due_date() {
    let today = date(2025, 6, 15);
    for due in [date(1990, 1, 1), today, date(2090, 12, 31)] {
        assert_eq!(classify(true, due, today), ExpenseStatus::Paid);
    }
}

#[test]
fn due_today_is_upcoming_and_yesterday_is_overdue() {
    let today = date(2025, 6, 15);
    assert_eq!(classify(false, today, today), ExpenseStatus::Upcoming);
    assert_eq!(
        classify(false, today - Duration::days(1), today),
        ExpenseStatus::Overdue
    );
    assert_eq!(
        classify(false, today + Duration::days(1), today),
        ExpenseStatus::Upcoming
    );
}

#[test]
fn status_labels() {
    assert_eq!(ExpenseStatus::Paid.label(), "Paga");
    assert_eq!(ExpenseStatus::Overdue.label(), "Vencida");
    assert_eq!(ExpenseStatus::Upcoming.to_string(), "A Vencer");
    assert_eq!(
        serde_json::to_string(&ExpenseStatus::Upcoming).unwrap(),
        "\"A Vencer\""
    );
}

#[test]
fn empty_month_is_all_zero() {
    let period = Period::month(2, 2024).unwrap();
    let s = aggregate(&[], &[], &period, date(2024, 2, 10));
    assert_eq!(s.total_expenses, Decimal::ZERO);
    assert_eq!(s.total_paid, Decimal::ZERO);
    assert_eq!(s.total_pending, Decimal::ZERO);
    assert_eq!(s.total_overdue, Decimal::ZERO);
    assert_eq!(s.total_incomes, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
    assert_eq!((s.month, s.year), (2, 2024));
}

fn scenario() -> (Vec<Expense>, Vec<Income>, NaiveDate) {
    let today = date(2025, 3, 15);
    let expenses = vec![
        expense("100", date(2025, 3, 5), true, "Housing"),
        expense("50", today - Duration::days(1), false, "Utilities"),
        expense("30", today + Duration::days(1), false, "Food"),
    ];
    let incomes = vec![income("500", date(2025, 3, 1))];
    (expenses, incomes, today)
}

#[test]
fn monthly_summary_scenario() {
    let (expenses, incomes, today) = scenario();
    let period = Period::month(3, 2025).unwrap();
    let s = aggregate(&expenses, &incomes, &period, today);
    assert_eq!(s.total_expenses, d("180"));
    assert_eq!(s.total_paid, d("100"));
    assert_eq!(s.total_overdue, d("50"));
    assert_eq!(s.total_pending, d("30"));
    assert_eq!(s.total_incomes, d("500"));
    assert_eq!(s.balance, d("320"));
}

#[test]
fn buckets_partition_total_and_balance_is_income_minus_expense() {
    let today = date(2025, 7, 10);
    let mut expenses = Vec::new();
    for day in 1..=31 {
        let amt = format!("{}.{:02}", day * 3, day);
        expenses.push(expense(&amt, date(2025, 7, day), day % 4 == 0, "Misc"));
    }
    let incomes = vec![income("12.34", date(2025, 7, 31)), income("1000", date(2025, 7, 2))];
    let period = Period::month(7, 2025).unwrap();
    let s = aggregate(&expenses, &incomes, &period, today);
    assert_eq!(s.total_paid + s.total_pending + s.total_overdue, s.total_expenses);
    assert_eq!(s.balance, s.total_incomes - s.total_expenses);
    // Day 10 is due today and unpaid: pending, not overdue
    assert!(s.total_pending >= d("30.10"));
}

#[test]
fn record_on_next_month_start_belongs_to_next_month() {
    let today = date(2025, 1, 20);
    let expenses = vec![
        expense("10", date(2025, 1, 31), false, "A"),
        expense("20", date(2025, 2, 1), false, "A"),
    ];
    let incomes = vec![income("5", date(2025, 1, 1)), income("7", date(2025, 2, 1))];

    let jan = aggregate(&expenses, &incomes, &Period::month(1, 2025).unwrap(), today);
    assert_eq!(jan.total_expenses, d("10"));
    assert_eq!(jan.total_incomes, d("5"));

    let feb = aggregate(&expenses, &incomes, &Period::month(2, 2025).unwrap(), today);
    assert_eq!(feb.total_expenses, d("20"));
    assert_eq!(feb.total_incomes, d("7"));
}

#[test]
fn status_chart_sorted_by_label() {
    let (expenses, _, today) = scenario();
    let period = Period::month(3, 2025).unwrap();
    let groups = totals_by_status(&expenses, &period, today);
    let got: Vec<(&str, Decimal)> = groups.iter().map(|g| (g.status.label(), g.total)).collect();
    assert_eq!(
        got,
        vec![("A Vencer", d("30")), ("Paga", d("100")), ("Vencida", d("50"))]
    );
}

#[test]
fn status_chart_omits_empty_groups() {
    let today = date(2025, 3, 15);
    let expenses = vec![expense("12", date(2025, 3, 1), true, "X")];
    let groups = totals_by_status(&expenses, &Period::month(3, 2025).unwrap(), today);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].status, ExpenseStatus::Paid);
}

#[test]
fn category_chart_largest_first_and_case_sensitive() {
    let expenses = vec![
        expense("10", date(2025, 3, 2), false, "food"),
        expense("15", date(2025, 3, 3), false, "Food"),
        expense("40", date(2025, 3, 4), true, "Rent"),
        expense("5", date(2025, 3, 5), false, "food"),
        expense("99", date(2025, 4, 1), false, "Food"),
    ];
    let groups = totals_by_category(&expenses, &Period::month(3, 2025).unwrap());
    let got: Vec<(&str, Decimal)> = groups
        .iter()
        .map(|g| (g.category.as_str(), g.total))
        .collect();
    // "Food" and "food" tie at 15; name order breaks the tie
    assert_eq!(
        got,
        vec![("Rent", d("40")), ("Food", d("15")), ("food", d("15"))]
    );
}

#[test]
fn yearly_chart_ascending_months_within_year() {
    let expenses = vec![
        expense("3", date(2025, 11, 30), false, "A"),
        expense("1", date(2025, 2, 1), false, "A"),
        expense("2", date(2025, 2, 28), true, "B"),
        expense("9", date(2026, 1, 1), false, "A"),
        expense("8", date(2024, 12, 31), false, "A"),
    ];
    let year = Period::year(2025).unwrap();
    let months = expenses_by_month(&expenses, &year);
    let got: Vec<(u32, Decimal)> = months.iter().map(|m| (m.month, m.total)).collect();
    assert_eq!(got, vec![(2, d("3")), (11, d("3"))]);

    let incomes = vec![income("100", date(2025, 12, 31)), income("50", date(2025, 1, 1))];
    let inc: Vec<u32> = incomes_by_month(&incomes, &year)
        .iter()
        .map(|m| m.month)
        .collect();
    assert_eq!(inc, vec![1, 12]);
}
