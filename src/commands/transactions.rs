// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::apply_filter_args;
use crate::config::Session;
use crate::forms::TransactionForm;
use crate::models::{RecordId, Transaction};
use crate::store::{open_ledger, Ledger};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::view::{AnalysisView, PageView};

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let ledger = open_ledger(session, conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            add(ledger.as_ref(), sub)?;
        }
        Some(("edit", sub)) => {
            edit(ledger.as_ref(), sub)?;
        }
        Some(("delete", sub)) => delete(ledger.as_ref(), sub)?,
        Some(("list", sub)) => list(ledger.as_ref(), sub)?,
        _ => {}
    }
    Ok(())
}

fn arg(sub: &clap::ArgMatches, id: &str) -> Option<String> {
    sub.get_one::<String>(id).cloned()
}

pub fn add(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<Transaction> {
    let form = TransactionForm {
        title: arg(sub, "title").unwrap_or_default(),
        description: arg(sub, "description").unwrap_or_default(),
        amount: arg(sub, "amount").unwrap_or_default(),
        tx_type: arg(sub, "type").unwrap_or_default(),
        date: arg(sub, "date").unwrap_or_default(),
    };
    let draft = form
        .validate(Utc::now())
        .map_err(|e| anyhow!("Transaction not saved: {}", e))?;
    let t = ledger.create_transaction(&draft)?;
    println!(
        "Recorded {} {} on {} ('{}', id {})",
        t.tx_type,
        fmt_money(&t.amount),
        t.created_at.date_naive(),
        t.display_title(),
        t.id
    );
    Ok(t)
}

/// Unspecified fields keep their current values.
pub fn edit(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<Transaction> {
    let id = RecordId::from(sub.get_one::<String>("id").unwrap().as_str());
    let current = ledger.transaction(&id)?;
    let form = TransactionForm {
        title: arg(sub, "title").unwrap_or_else(|| current.title.clone()),
        description: arg(sub, "description").unwrap_or_else(|| current.description.clone()),
        amount: arg(sub, "amount").unwrap_or_else(|| current.amount.to_string()),
        tx_type: arg(sub, "type").unwrap_or_else(|| current.tx_type.to_string()),
        date: arg(sub, "date").unwrap_or_else(|| current.created_at.to_rfc3339()),
    };
    let draft = form
        .validate(Utc::now())
        .map_err(|e| anyhow!("Transaction not saved: {}", e))?;
    let t = ledger.update_transaction(&id, &draft)?;
    println!("Updated transaction {}", t.id);
    Ok(t)
}

fn delete(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = RecordId::from(sub.get_one::<String>("id").unwrap().as_str());
    ledger.delete_transaction(&id)?;
    println!("Deleted transaction {}", id);
    Ok(())
}

fn list(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let out = query_rows(ledger, sub)?;
    if jsonl_flag {
        maybe_print_json(false, true, &out.rows)?;
        return Ok(());
    }
    if !maybe_print_json(json_flag, false, &out)? {
        let rows: Vec<Vec<String>> = out
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.title.clone(),
                    r.description.clone(),
                    r.tx_type.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Title", "Description", "Type", "Amount"], rows)
        );
        println!("{}", out.footer());
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id.to_string(),
            date: t.created_at.date_naive().to_string(),
            title: t.display_title().to_string(),
            description: t.description.clone(),
            tx_type: t.tx_type.to_string(),
            amount: format!("{:.2}", t.amount),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionList {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub rows: Vec<TransactionRow>,
}

impl From<PageView<'_>> for TransactionList {
    fn from(page: PageView<'_>) -> Self {
        TransactionList {
            page: page.number,
            total_pages: page.total_pages,
            total_items: page.total_items,
            has_previous: page.has_previous,
            has_next: page.has_next,
            rows: page.rows.into_iter().map(TransactionRow::from).collect(),
        }
    }
}

impl TransactionList {
    pub fn footer(&self) -> String {
        let mark = |enabled: bool| if enabled { "enabled" } else { "disabled" };
        format!(
            "Page {} of {} ({} transactions) | previous: {} | next: {}",
            self.page,
            self.total_pages,
            self.total_items,
            mark(self.has_previous),
            mark(self.has_next)
        )
    }
}

/// Filtered, paginated list. A failed fetch leaves an empty list behind.
pub fn query_rows(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<TransactionList> {
    let mut view = AnalysisView::new();
    view.refresh(ledger);
    apply_filter_args(&mut view, sub)?;
    let page_size = sub.get_one::<usize>("page-size").copied().unwrap_or(10);
    let page_number = sub.get_one::<usize>("page").copied().unwrap_or(1);
    Ok(TransactionList::from(view.page(page_size, page_number)))
}
