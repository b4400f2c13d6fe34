// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filter state shared by the transaction list and the analysis charts.
//!
//! Type selection can be driven by two controls, the dropdown and the pie
//! chart. Both funnel through [`FilterState`] so only one type rule is ever
//! active at a time.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Transaction, TxType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TxType),
}

impl TypeFilter {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(TypeFilter::All)
        } else {
            Ok(TypeFilter::Only(s.parse()?))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PieSelection {
    #[default]
    Unselected,
    Selected(TxType),
}

/// Each end is set independently; the range only filters once both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }

    /// Inclusive on both ends, compared on the calendar date of `created_at`.
    pub fn admits(&self, t: &Transaction) -> bool {
        match self.bounds() {
            Some((start, end)) => {
                let day = t.created_at.date_naive();
                start <= day && day <= end
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterState {
    active_type: TypeFilter,
    pie: PieSelection,
    date_range: DateRange,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_type(&self) -> TypeFilter {
        self.active_type
    }

    pub fn pie_selection(&self) -> PieSelection {
        self.pie
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Pie segment click: selects `t`, or deselects it when it is already selected.
    pub fn click_segment(&mut self, t: TxType) {
        if self.pie == PieSelection::Selected(t) {
            self.reset_selection();
        } else {
            self.pie = PieSelection::Selected(t);
            self.active_type = TypeFilter::Only(t);
        }
    }

    /// Dropdown change. Keeps the pie selection mirrored.
    pub fn select_type(&mut self, filter: TypeFilter) {
        self.active_type = filter;
        self.pie = match filter {
            TypeFilter::All => PieSelection::Unselected,
            TypeFilter::Only(t) => PieSelection::Selected(t),
        };
    }

    pub fn reset_selection(&mut self) {
        self.pie = PieSelection::Unselected;
        self.active_type = TypeFilter::All;
    }

    pub fn set_start(&mut self, start: Option<NaiveDate>) {
        self.date_range.start = start;
    }

    pub fn set_end(&mut self, end: Option<NaiveDate>) {
        self.date_range.end = end;
    }

    pub fn clear_date_range(&mut self) {
        self.date_range = DateRange::default();
    }

    pub fn matches_date(&self, t: &Transaction) -> bool {
        self.date_range.admits(t)
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        matches(t, self)
    }
}

/// List predicate: date range first, then pie selection, then dropdown.
pub fn matches(t: &Transaction, state: &FilterState) -> bool {
    if !state.date_range.admits(t) {
        return false;
    }
    if let PieSelection::Selected(sel) = state.pie {
        return t.tx_type == sel;
    }
    match state.active_type {
        TypeFilter::All => true,
        TypeFilter::Only(ty) => t.tx_type == ty,
    }
}

/// Rows for the list view (date and type).
pub fn filter_list<'a>(txs: &'a [Transaction], state: &FilterState) -> Vec<&'a Transaction> {
    txs.iter().filter(|t| matches(t, state)).collect()
}

/// Rows feeding the charts (date only).
pub fn filter_by_date<'a>(txs: &'a [Transaction], state: &FilterState) -> Vec<&'a Transaction> {
    txs.iter().filter(|t| state.matches_date(t)).collect()
}
