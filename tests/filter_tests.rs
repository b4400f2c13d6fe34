// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use inflow::filter::{matches, FilterState, PieSelection, TypeFilter};
use inflow::models::{timestamp, RecordId, Transaction, TxType};
use inflow::view::AnalysisView;
use rust_decimal::Decimal;

fn tx(id: &str, amount: i64, ty: TxType, date: &str) -> Transaction {
    Transaction {
        id: RecordId::from(id),
        title: format!("t{}", id),
        description: String::new(),
        amount: Decimal::from(amount),
        tx_type: ty,
        created_at: timestamp::parse(date).unwrap(),
    }
}

fn d(s: &str) -> Option<NaiveDate> {
    Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("1", 100, TxType::Income, "2024-01-10"),
        tx("2", 40, TxType::Expense, "2024-01-15"),
        tx("3", 20, TxType::Expense, "2024-02-01"),
        tx("4", 15, TxType::UpcomingExpense, "2024-03-05T18:30:00Z"),
    ]
}

#[test]
fn segment_click_twice_returns_to_all() {
    let mut f = FilterState::new();
    f.click_segment(TxType::Expense);
    assert_eq!(f.pie_selection(), PieSelection::Selected(TxType::Expense));
    assert_eq!(f.active_type(), TypeFilter::Only(TxType::Expense));
    f.click_segment(TxType::Expense);
    assert_eq!(f.pie_selection(), PieSelection::Unselected);
    assert_eq!(f.active_type(), TypeFilter::All);
}

#[test]
fn clicking_another_segment_moves_selection() {
    let mut f = FilterState::new();
    f.click_segment(TxType::Income);
    f.click_segment(TxType::UpcomingExpense);
    assert_eq!(
        f.pie_selection(),
        PieSelection::Selected(TxType::UpcomingExpense)
    );
    assert_eq!(f.active_type(), TypeFilter::Only(TxType::UpcomingExpense));
}

#[test]
fn dropdown_keeps_pie_mirrored() {
    let mut f = FilterState::new();
    f.select_type(TypeFilter::Only(TxType::Income));
    assert_eq!(f.pie_selection(), PieSelection::Selected(TxType::Income));
    f.click_segment(TxType::Expense);
    f.select_type(TypeFilter::All);
    assert_eq!(f.pie_selection(), PieSelection::Unselected);
    assert_eq!(f.active_type(), TypeFilter::All);
}

#[test]
fn date_range_is_inclusive_and_checked_first() {
    let txs = sample();
    let mut f = FilterState::new();
    f.set_start(d("2024-01-15"));
    f.set_end(d("2024-02-01"));
    let ids: Vec<&str> = txs
        .iter()
        .filter(|t| matches(t, &f))
        .map(|t| t.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["2", "3"]);

    // Type match does not rescue a row outside the window.
    f.click_segment(TxType::Income);
    assert!(!matches(&txs[0], &f));
}

#[test]
fn half_open_range_does_not_filter() {
    let txs = sample();
    let mut f = FilterState::new();
    f.set_start(d("2030-01-01"));
    assert!(txs.iter().all(|t| matches(t, &f)));
}

#[test]
fn charts_ignore_type_but_list_respects_it() {
    let mut view = AnalysisView::with_transactions(sample());
    view.click_segment(TxType::Expense);

    let listed: Vec<&str> = view.filtered().into_iter().map(|t| t.id.0.as_str()).collect();
    assert_eq!(listed, vec!["3", "2"]);
    assert_eq!(view.charts().type_totals.len(), 3);
    assert_eq!(view.charts().total_for(TxType::Income), Decimal::from(100));

    view.set_date_range(d("2024-01-01"), d("2024-01-31"));
    assert_eq!(view.charts().type_totals.len(), 2);
    assert_eq!(view.charts().total_for(TxType::UpcomingExpense), Decimal::ZERO);
    let listed: Vec<&str> = view.filtered().into_iter().map(|t| t.id.0.as_str()).collect();
    assert_eq!(listed, vec!["2"]);

    view.clear_date_range();
    assert_eq!(view.charts().type_totals.len(), 3);
}

#[test]
fn replacing_transactions_resets_selection() {
    let mut view = AnalysisView::with_transactions(sample());
    view.click_segment(TxType::UpcomingExpense);
    view.replace_transactions(vec![tx("9", 1, TxType::Income, "2024-06-01")]);
    assert_eq!(view.filter().pie_selection(), PieSelection::Unselected);
    assert_eq!(view.filter().active_type(), TypeFilter::All);
    assert_eq!(view.filtered().len(), 1);
}

#[test]
fn type_filter_parses_dropdown_values() {
    assert_eq!(TypeFilter::parse("all").unwrap(), TypeFilter::All);
    assert_eq!(
        TypeFilter::parse("upcoming expense").unwrap(),
        TypeFilter::Only(TxType::UpcomingExpense)
    );
    assert!(TypeFilter::parse("transfer").is_err());
}
