// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use inflow::{cli, commands::transactions, store::Ledger, store::LocalStore};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    inflow::db::init_schema(&conn).unwrap();
    conn
}

fn sub<'a>(m: &'a clap::ArgMatches, name: &str) -> &'a clap::ArgMatches {
    m.subcommand_matches("tx")
        .unwrap()
        .subcommand_matches(name)
        .unwrap()
}

fn add(store: &LocalStore, title: &str, amount: &str, ty: &str, date: &str) {
    let m = cli::build_cli().get_matches_from([
        "inflow", "tx", "add", "--title", title, "--amount", amount, "--type", ty, "--date", date,
    ]);
    transactions::add(store, sub(&m, "add")).unwrap();
}

#[test]
fn list_is_newest_first_and_paginated() {
    let conn = setup();
    let store = LocalStore::new(&conn);
    add(&store, "Salary", "2500", "income", "2024-01-01");
    add(&store, "Rent", "900", "expense", "2024-01-03");
    add(&store, "Groceries", "120.50", "expense", "2024-01-09");

    let m = cli::build_cli().get_matches_from(["inflow", "tx", "list", "--page-size", "2"]);
    let out = transactions::query_rows(&store, sub(&m, "list")).unwrap();
    assert_eq!(out.total_items, 3);
    assert_eq!(out.total_pages, 2);
    assert!(!out.has_previous);
    assert!(out.has_next);
    assert_eq!(out.rows.len(), 2);
    assert_eq!(out.rows[0].title, "Groceries");
    assert_eq!(out.rows[0].amount, "120.50");
    assert_eq!(out.rows[1].title, "Rent");

    let m = cli::build_cli().get_matches_from([
        "inflow", "tx", "list", "--page-size", "2", "--page", "9",
    ]);
    let out = transactions::query_rows(&store, sub(&m, "list")).unwrap();
    assert_eq!(out.page, 2);
    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].title, "Salary");
    assert!(out.has_previous);
    assert!(!out.has_next);
}

#[test]
fn list_filters_by_type_and_dates() {
    let conn = setup();
    let store = LocalStore::new(&conn);
    add(&store, "Salary", "2500", "income", "2024-01-01");
    add(&store, "Rent", "900", "expense", "2024-02-03");
    add(&store, "Insurance", "300", "upcoming", "2024-03-15");

    let m = cli::build_cli().get_matches_from(["inflow", "tx", "list", "--type", "expense"]);
    let out = transactions::query_rows(&store, sub(&m, "list")).unwrap();
    let titles: Vec<&str> = out.rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Rent"]);

    let m = cli::build_cli().get_matches_from([
        "inflow", "tx", "list", "--from", "2024-02-03", "--to", "2024-03-15",
    ]);
    let out = transactions::query_rows(&store, sub(&m, "list")).unwrap();
    assert_eq!(out.total_items, 2);
    assert_eq!(out.rows[0].tx_type, "UpcomingExpense");
}

#[test]
fn edit_keeps_unspecified_fields() {
    let conn = setup();
    let store = LocalStore::new(&conn);
    add(&store, "Rent", "900", "expense", "2024-02-03");
    let id = store.transactions().unwrap()[0].id.to_string();

    let m = cli::build_cli().get_matches_from(["inflow", "tx", "edit", &id, "--amount", "950"]);
    let t = transactions::edit(&store, sub(&m, "edit")).unwrap();
    assert_eq!(t.title, "Rent");
    assert_eq!(t.amount.to_string(), "950");
    assert_eq!(t.created_at.date_naive().to_string(), "2024-02-03");
    assert_eq!(store.transactions().unwrap().len(), 1);
}

#[test]
fn invalid_form_saves_nothing() {
    let conn = setup();
    let store = LocalStore::new(&conn);
    let m = cli::build_cli().get_matches_from([
        "inflow", "tx", "add", "--title", "Oops", "--amount=-5", "--type", "expense",
    ]);
    let err = transactions::add(&store, sub(&m, "add")).unwrap_err();
    assert!(err.to_string().contains("amount"));
    assert!(store.transactions().unwrap().is_empty());
}
