// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use inflow::commands::{dashboard, goals};
use inflow::config::Session;
use inflow::models::{timestamp, Goal, GoalDraft, RecordId, Transaction, TransactionDraft, TxType};
use inflow::store::{open_ledger, Ledger, LocalStore, GOALS_KEY, TRANSACTIONS_KEY};
use inflow::view::AnalysisView;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    inflow::db::init_schema(&conn).unwrap();
    conn
}

fn draft(title: &str, amount: i64, ty: TxType, date: &str) -> TransactionDraft {
    TransactionDraft {
        title: title.into(),
        description: String::new(),
        amount: Decimal::from(amount),
        tx_type: ty,
        created_at: timestamp::parse(date).unwrap(),
    }
}

fn goal(name: &str, limit: &str, done: bool) -> GoalDraft {
    GoalDraft {
        name: name.into(),
        description: String::new(),
        time_limit: timestamp::parse(limit).unwrap(),
        is_completed: done,
    }
}

#[test]
fn local_transactions_round_trip_through_kv() {
    let conn = setup();
    let store = LocalStore::new(&conn);
    let a = store
        .create_transaction(&draft("Salary", 100, TxType::Income, "2024-01-10"))
        .unwrap();
    let b = store
        .create_transaction(&draft("Rent", 40, TxType::Expense, "2024-01-15"))
        .unwrap();
    assert_ne!(a.id, b.id);

    let updated = store
        .update_transaction(&b.id, &draft("Rent", 45, TxType::Expense, "2024-01-15"))
        .unwrap();
    assert_eq!(updated.amount, Decimal::from(45));
    assert_eq!(store.transaction(&b.id).unwrap().amount, Decimal::from(45));

    store.delete_transaction(&a.id).unwrap();
    let left = store.transactions().unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, b.id);

    assert!(store.delete_transaction(&a.id).is_err());
    assert!(store
        .update_transaction(&RecordId::from("nope"), &draft("x", 1, TxType::Income, "2024-01-01"))
        .is_err());
}

#[test]
fn legacy_local_records_decode() {
    let conn = setup();
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)",
        params![
            TRANSACTIONS_KEY,
            r#"[
                {"id": 1704067200000, "description": "Coffee", "amount": "-4.50", "type": "expense", "date": "2024-01-01"},
                {"_id": "abc", "title": "Pay", "amount": 2500, "type": "Income", "createdAt": "2024-01-31T09:00:00.000Z"},
                {"id": "x9", "title": "Insurance", "amount": 12.5, "type": "upcoming expense", "created_at": "2024-02-01T00:00:00"}
            ]"#
        ],
    )
    .unwrap();
    let txs = LocalStore::new(&conn).transactions().unwrap();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[0].id, RecordId::from("1704067200000"));
    assert_eq!(txs[0].amount, Decimal::new(450, 2));
    assert_eq!(txs[0].tx_type, TxType::Expense);
    assert_eq!(txs[0].display_title(), "Coffee");
    assert_eq!(txs[1].id, RecordId::from("abc"));
    assert_eq!(txs[1].tx_type, TxType::Income);
    assert_eq!(txs[2].tx_type, TxType::UpcomingExpense);
    assert_eq!(txs[2].amount, Decimal::new(125, 1));
}

#[test]
fn corrupt_store_is_an_error() {
    let conn = setup();
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)",
        params![GOALS_KEY, "{not json"],
    )
    .unwrap();
    assert!(LocalStore::new(&conn).goals().is_err());
}

#[test]
fn toggle_goal_flips_completion() {
    let conn = setup();
    let store = LocalStore::new(&conn);
    let g = store.create_goal(&goal("Emergency fund", "2025-06-30", false)).unwrap();
    let t = store.toggle_goal(&g.id).unwrap();
    assert!(t.is_completed);
    assert_eq!(t.name, "Emergency fund");
    assert!(!store.toggle_goal(&g.id).unwrap().is_completed);
    assert!(store.toggle_goal(&RecordId::from("missing")).is_err());
}

#[test]
fn overdue_goals_are_derived_from_now() {
    let now = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let past = Goal {
        id: RecordId::from("g1"),
        name: "Holiday".into(),
        description: String::new(),
        time_limit: timestamp::parse("2022-12-31").unwrap(),
        is_completed: false,
    };
    assert!(past.is_overdue(now));
    let done = Goal {
        is_completed: true,
        ..past.clone()
    };
    assert!(!done.is_overdue(now));
    let exact = Goal {
        time_limit: now,
        ..past.clone()
    };
    assert!(!exact.is_overdue(now));

    let mut new_year = Goal {
        time_limit: timestamp::parse("2023-01-01").unwrap(),
        ..past.clone()
    };
    let later = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    assert!(new_year.is_overdue(later));
    new_year.is_completed = true;
    assert!(!new_year.is_overdue(later));

    let conn = setup();
    let store = LocalStore::new(&conn);
    store.create_goal(&goal("Holiday", "2022-12-31", false)).unwrap();
    store.create_goal(&goal("Car", "2022-06-01", true)).unwrap();
    store.create_goal(&goal("House", "2030-01-01", false)).unwrap();
    let rows = goals::query_rows(&store, true, now);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Holiday");
    assert!(rows[0].overdue);
    assert_eq!(goals::query_rows(&store, false, now).len(), 3);
}

#[test]
fn goal_wire_names_decode() {
    let g: Goal = serde_json::from_str(
        r#"{"_id":"g7","title":"Bike","timeLimit":"2024-05-01","isCompleted":true}"#,
    )
    .unwrap();
    assert_eq!(g.name, "Bike");
    assert!(g.is_completed);
    let v = serde_json::to_value(GoalDraft::from(&g)).unwrap();
    assert_eq!(v["timelimit"], "2024-05-01T00:00:00.000Z");
}

#[test]
fn dashboard_summarises_local_data() {
    let conn = setup();
    let store = LocalStore::new(&conn);
    store
        .create_transaction(&draft("Salary", 100, TxType::Income, "2024-01-10"))
        .unwrap();
    store
        .create_transaction(&draft("Rent", 40, TxType::Expense, "2024-01-15"))
        .unwrap();
    store
        .create_transaction(&draft("Tax", 25, TxType::UpcomingExpense, "2024-02-15"))
        .unwrap();
    store.create_goal(&goal("Old", "2020-01-01", false)).unwrap();

    let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let d = dashboard::build(&store, 2, now);
    assert_eq!(d.income, Decimal::from(100));
    assert_eq!(d.net, Decimal::from(35));
    assert_eq!(d.goals_total, 1);
    assert_eq!(d.goals_overdue, 1);
    assert_eq!(d.recent.len(), 2);
    assert_eq!(d.recent[0].title, "Tax");
}

#[test]
fn offline_session_uses_local_store() {
    let conn = setup();
    let mut session = Session::new("http://127.0.0.1:9/api", Some("tok".into()));
    session.offline = true;
    let ledger = open_ledger(&session, &conn).unwrap();
    ledger
        .create_transaction(&draft("Cash", 5, TxType::Income, "2024-01-01"))
        .unwrap();
    assert_eq!(LocalStore::new(&conn).transactions().unwrap().len(), 1);
}

struct Broken;

impl Ledger for Broken {
    fn transactions(&self) -> Result<Vec<Transaction>> {
        Err(anyhow!("backend down"))
    }
    fn create_transaction(&self, _: &TransactionDraft) -> Result<Transaction> {
        Err(anyhow!("backend down"))
    }
    fn update_transaction(&self, _: &RecordId, _: &TransactionDraft) -> Result<Transaction> {
        Err(anyhow!("backend down"))
    }
    fn delete_transaction(&self, _: &RecordId) -> Result<()> {
        Err(anyhow!("backend down"))
    }
    fn goals(&self) -> Result<Vec<Goal>> {
        Err(anyhow!("backend down"))
    }
    fn create_goal(&self, _: &GoalDraft) -> Result<Goal> {
        Err(anyhow!("backend down"))
    }
    fn update_goal(&self, _: &RecordId, _: &GoalDraft) -> Result<Goal> {
        Err(anyhow!("backend down"))
    }
    fn delete_goal(&self, _: &RecordId) -> Result<()> {
        Err(anyhow!("backend down"))
    }
}

#[test]
fn failed_refresh_keeps_previous_records() {
    let conn = setup();
    let store = LocalStore::new(&conn);
    store
        .create_transaction(&draft("Salary", 100, TxType::Income, "2024-01-10"))
        .unwrap();
    let mut view = AnalysisView::new();
    assert!(view.refresh(&store));
    view.click_segment(TxType::Income);

    assert!(!view.refresh(&Broken));
    assert_eq!(view.transactions().len(), 1);
    assert_eq!(view.filtered().len(), 1);
    assert_eq!(view.charts().total_for(TxType::Income), Decimal::from(100));
}

#[test]
fn local_store_keeps_every_digit() {
    let conn = setup();
    let store = LocalStore::new(&conn);
    for raw in ["12345678901234567.89", "0.1000000000000000000001"] {
        let amount: Decimal = raw.parse().unwrap();
        let mut d = draft("Precise", 0, TxType::Expense, "2024-01-10");
        d.amount = amount;
        let t = store.create_transaction(&d).unwrap();
        assert_eq!(store.transaction(&t.id).unwrap().amount, amount);

        let stored: String = conn
            .query_row(
                "SELECT value FROM kv WHERE key=?1",
                params![TRANSACTIONS_KEY],
                |r| r.get(0),
            )
            .unwrap();
        assert!(stored.contains(raw), "{} missing from {}", raw, stored);
    }
}
