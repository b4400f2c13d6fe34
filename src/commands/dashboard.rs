// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::transactions::TransactionRow;
use crate::config::Session;
use crate::models::TxType;
use crate::store::{open_ledger, Ledger};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::view::{AnalysisView, GoalsView};

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub income: Decimal,
    pub expenses: Decimal,
    pub upcoming: Decimal,
    /// income - expenses - upcoming
    pub net: Decimal,
    pub goals_total: usize,
    pub goals_overdue: usize,
    pub recent: Vec<TransactionRow>,
}

pub fn build(ledger: &dyn Ledger, recent: usize, now: DateTime<Utc>) -> Dashboard {
    let mut txs = AnalysisView::new();
    txs.refresh(ledger);
    let mut goals = GoalsView::new();
    goals.refresh(ledger);

    let charts = txs.charts();
    let income = charts.total_for(TxType::Income);
    let expenses = charts.total_for(TxType::Expense);
    let upcoming = charts.total_for(TxType::UpcomingExpense);
    Dashboard {
        income,
        expenses,
        upcoming,
        net: income - expenses - upcoming,
        goals_total: goals.goals().len(),
        goals_overdue: goals.overdue(now).len(),
        recent: txs
            .transactions()
            .iter()
            .take(recent)
            .map(TransactionRow::from)
            .collect(),
    }
}

pub fn handle(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = open_ledger(session, conn)?;
    let recent = sub.get_one::<usize>("recent").copied().unwrap_or(5);
    let d = build(ledger.as_ref(), recent, Utc::now());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &d)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Upcoming", "Net", "Goals", "Overdue"],
            vec![vec![
                fmt_money(&d.income),
                fmt_money(&d.expenses),
                fmt_money(&d.upcoming),
                fmt_money(&d.net),
                d.goals_total.to_string(),
                d.goals_overdue.to_string(),
            ]],
        )
    );
    let rows: Vec<Vec<String>> = d
        .recent
        .iter()
        .map(|r| vec![r.date.clone(), r.title.clone(), r.tx_type.clone(), r.amount.clone()])
        .collect();
    println!("{}", pretty_table(&["Date", "Title", "Type", "Amount"], rows));
    Ok(())
}
