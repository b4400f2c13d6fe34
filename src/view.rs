// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! View models. Each state transition is a `&mut self` method that finishes
//! by recomputing the derived chart data, so readers never see a stale mix.

use chrono::{DateTime, NaiveDate, Utc};

use crate::aggregate::{aggregate, ChartDataset};
use crate::filter::{filter_by_date, filter_list, FilterState, TypeFilter};
use crate::models::{Goal, Transaction, TxType};
use crate::paginate::{paginate, Page};
use crate::store::Ledger;

#[derive(Debug, Clone, Default)]
pub struct AnalysisView {
    transactions: Vec<Transaction>,
    filter: FilterState,
    charts: ChartDataset,
}

impl AnalysisView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        let mut v = Self::new();
        v.replace_transactions(transactions);
        v
    }

    /// Swaps in a new record set, newest first. Any pie selection is dropped
    /// since the selected type may no longer have data.
    pub fn replace_transactions(&mut self, mut transactions: Vec<Transaction>) {
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.transactions = transactions;
        self.filter.reset_selection();
        self.recompute();
    }

    /// Returns false when the fetch failed; the previous records stay in place.
    pub fn refresh(&mut self, ledger: &dyn Ledger) -> bool {
        match ledger.transactions() {
            Ok(txs) => {
                self.replace_transactions(txs);
                true
            }
            Err(e) => {
                log::error!("failed to fetch transactions: {:#}", e);
                false
            }
        }
    }

    pub fn click_segment(&mut self, t: TxType) {
        self.filter.click_segment(t);
        self.recompute();
    }

    pub fn select_type(&mut self, filter: TypeFilter) {
        self.filter.select_type(filter);
        self.recompute();
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.filter.set_start(start);
        self.filter.set_end(end);
        self.recompute();
    }

    pub fn clear_date_range(&mut self) {
        self.filter.clear_date_range();
        self.recompute();
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Chart data: date range applied, type selection ignored.
    pub fn charts(&self) -> &ChartDataset {
        &self.charts
    }

    /// List rows: date range and type selection applied.
    pub fn filtered(&self) -> Vec<&Transaction> {
        filter_list(&self.transactions, &self.filter)
    }

    pub fn page(&self, page_size: usize, page_number: usize) -> PageView<'_> {
        let rows = self.filtered();
        PageView::from(paginate(&rows, page_size, page_number))
    }

    fn recompute(&mut self) {
        self.charts = aggregate(filter_by_date(&self.transactions, &self.filter));
    }
}

/// Owned copy of a [`Page`] over borrowed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Transaction>,
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<'a, 'b> From<Page<'b, &'a Transaction>> for PageView<'a> {
    fn from(p: Page<'b, &'a Transaction>) -> Self {
        PageView {
            rows: p.items.to_vec(),
            number: p.number,
            total_pages: p.total_pages,
            total_items: p.total_items,
            has_previous: p.has_previous(),
            has_next: p.has_next(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoalsView {
    goals: Vec<Goal>,
}

impl GoalsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, ledger: &dyn Ledger) -> bool {
        match ledger.goals() {
            Ok(goals) => {
                self.goals = goals;
                true
            }
            Err(e) => {
                log::error!("failed to fetch goals: {:#}", e);
                false
            }
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<&Goal> {
        self.goals.iter().filter(|g| g.is_overdue(now)).collect()
    }
}
