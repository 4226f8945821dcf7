// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use saldozen::auth;
use saldozen::db;
use saldozen::error::FinanceError;
use saldozen::models::{Category, ExpenseDraft, IncomeDraft};
use saldozen::period::Period;
use saldozen::store::{RecordSource, SqliteStore};
use uuid::Uuid;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

fn date(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn user(store: &SqliteStore, email: &str) -> Uuid {
    auth::register(store, "Ana", email, "s3cret!", Utc::now())
        .unwrap()
        .id
}

fn expense_draft(desc: &str, amount: &str, due: NaiveDate) -> ExpenseDraft {
    ExpenseDraft {
        description: desc.into(),
        amount: amount.parse().unwrap(),
        due_date: due,
        paid: false,
        paid_at: None,
        category: "Casa".into(),
        note: Some("monthly".into()),
    }
}

#[test]
fn expense_round_trips_through_sqlite() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let uid = user(&store, "ana@example.com");
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
    let mut d = expense_draft("Internet", "99.90", date(2025, 3, 10));
    d.paid = true;
    let e = d.into_expense(uid, now).unwrap();
    store.insert_expense(&e).unwrap();

    let back = store.expense(uid, e.id).unwrap();
    assert_eq!(back, e);
    assert_eq!(back.paid_at, Some(now));
}

#[test]
fn period_query_is_half_open() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let uid = user(&store, "ana@example.com");
    let now = Utc::now();
    for (desc, due) in [
        ("first", date(2025, 1, 1)),
        ("last", date(2025, 1, 31)),
        ("next", date(2025, 2, 1)),
        ("prev", date(2024, 12, 31)),
    ] {
        let e = expense_draft(desc, "10", due).into_expense(uid, now).unwrap();
        store.insert_expense(&e).unwrap();
    }
    let jan = store
        .expenses_in(uid, &Period::month(1, 2025).unwrap())
        .unwrap();
    let names: Vec<&str> = jan.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(names, vec!["first", "last"]);

    let feb = store
        .expenses_in(uid, &Period::month(2, 2025).unwrap())
        .unwrap();
    assert_eq!(feb.len(), 1);
    assert_eq!(feb[0].description, "next");

    assert_eq!(store.all_expenses(uid).unwrap().len(), 4);
}

#[test]
fn records_are_scoped_to_their_owner() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let ana = user(&store, "ana@example.com");
    let bia = user(&store, "bia@example.com");
    let e = expense_draft("Gym", "120", date(2025, 6, 5))
        .into_expense(ana, Utc::now())
        .unwrap();
    store.insert_expense(&e).unwrap();

    let err = store.expense(bia, e.id).unwrap_err();
    assert!(err.downcast_ref::<FinanceError>().unwrap().is_not_found());
    assert!(store.delete_expense(bia, e.id).is_err());
    assert!(store.all_expenses(bia).unwrap().is_empty());

    store.delete_expense(ana, e.id).unwrap();
    assert!(store.all_expenses(ana).unwrap().is_empty());
}

#[test]
fn income_update_and_period_listing() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let uid = user(&store, "ana@example.com");
    let draft = IncomeDraft {
        description: "Salary".into(),
        amount: "5000".parse().unwrap(),
        received_on: date(2025, 4, 30),
        category: "Work".into(),
        note: None,
    };
    let mut inc = draft.into_income(uid, Utc::now()).unwrap();
    store.insert_income(&inc).unwrap();

    let edit = IncomeDraft {
        description: "Salary".into(),
        amount: "5200".parse().unwrap(),
        received_on: date(2025, 5, 1),
        category: "Work".into(),
        note: Some("raise".into()),
    };
    edit.apply_to(&mut inc).unwrap();
    store.update_income(&inc).unwrap();

    let april = store
        .incomes_in(uid, &Period::month(4, 2025).unwrap())
        .unwrap();
    assert!(april.is_empty());
    let may = store
        .incomes_in(uid, &Period::month(5, 2025).unwrap())
        .unwrap();
    assert_eq!(may, vec![inc]);
}

#[test]
fn categories_unique_per_user_and_sorted() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let ana = user(&store, "ana@example.com");
    let bia = user(&store, "bia@example.com");
    let cat = |uid: Uuid, name: &str| Category {
        id: Uuid::new_v4(),
        user_id: uid,
        name: name.into(),
        created_at: Utc::now(),
    };
    store.insert_category(&cat(ana, "Transporte")).unwrap();
    store.insert_category(&cat(ana, "Alimentação")).unwrap();
    store.insert_category(&cat(bia, "Transporte")).unwrap();

    let err = store.insert_category(&cat(ana, "Transporte")).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::DuplicateCategory("Transporte".into()))
    );

    let names: Vec<String> = store
        .categories(ana)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Alimentação", "Transporte"]);

    store.delete_category(ana, "Transporte").unwrap();
    assert!(store.delete_category(ana, "Transporte").is_err());
    assert_eq!(store.categories(bia).unwrap().len(), 1);
}

#[test]
fn login_session_lifecycle() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let uid = user(&store, "ana@example.com");
    let now = Utc::now();

    let err = auth::current_user(&store, now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::NotLoggedIn)
    );

    let err = auth::login(&store, "ana@example.com", "wrong", now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::InvalidCredentials)
    );
    let err = auth::login(&store, "nobody@example.com", "s3cret!", now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::InvalidCredentials)
    );

    auth::login(&store, "  ANA@example.com ", "s3cret!", now).unwrap();
    assert_eq!(auth::current_user(&store, now).unwrap().id, uid);

    let much_later = now + Duration::days(30);
    let err = auth::current_user(&store, much_later).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::SessionExpired)
    );

    auth::logout(&store).unwrap();
    assert!(auth::current_user(&store, now).is_err());
}

#[test]
fn registration_validates_input() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let now = Utc::now();

    let err = auth::register(&store, " ", "a@b.co", "x", now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::MissingField("name"))
    );
    let err = auth::register(&store, "Ana", "not-an-email", "x", now).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::InvalidEmail(_))
    ));
    let err = auth::register(&store, "Ana", "a@b.co", "", now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::MissingField("password"))
    );

    let u = auth::register(&store, "Ana", "a@b.co", "pw", now).unwrap();
    assert_ne!(u.password_hash, "pw");
    assert!(auth::verify_password("pw", &u.password_hash));
    let err = auth::register(&store, "Ana 2", "A@B.co", "pw", now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::DuplicateEmail("a@b.co".into()))
    );

    let json = serde_json::to_string(&u).unwrap();
    assert!(!json.contains("password"));
}
