// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::aggregate::ChartDataset;
use crate::commands::apply_filter_args;
use crate::commands::transactions::TransactionList;
use crate::config::Session;
use crate::filter::FilterState;
use crate::store::{open_ledger, Ledger};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::view::AnalysisView;

pub fn handle(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = open_ledger(session, conn)?;
    let report = build(ledger.as_ref(), sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        render(&report);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub filter: FilterState,
    pub charts: ChartDataset,
    pub list: TransactionList,
}

pub fn build(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<AnalysisReport> {
    let mut view = AnalysisView::new();
    view.refresh(ledger);
    apply_filter_args(&mut view, sub)?;
    let page_size = sub.get_one::<usize>("page-size").copied().unwrap_or(10);
    let page_number = sub.get_one::<usize>("page").copied().unwrap_or(1);
    let list = TransactionList::from(view.page(page_size, page_number));
    Ok(AnalysisReport {
        filter: *view.filter(),
        charts: view.charts().clone(),
        list,
    })
}

fn render(report: &AnalysisReport) {
    let types: Vec<Vec<String>> = report
        .charts
        .type_totals
        .iter()
        .map(|t| vec![t.label.to_string(), fmt_money(&t.value)])
        .collect();
    println!("{}", pretty_table(&["Type", "Total"], types));

    let months: Vec<Vec<String>> = report
        .charts
        .monthly_totals
        .iter()
        .map(|m| {
            vec![
                m.month.to_string(),
                fmt_money(&m.income),
                fmt_money(&m.expenses),
                fmt_money(&m.upcoming),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Upcoming"], months)
    );

    let rows: Vec<Vec<String>> = report
        .list
        .rows
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.title.clone(),
                r.tx_type.clone(),
                r.amount.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Title", "Type", "Amount"], rows)
    );
    println!("{}", report.list.footer());
}
