// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart datasets derived from a (date-filtered) transaction set.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TxType};

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeTotal {
    pub label: &'static str,
    pub value: Decimal,
    #[serde(rename = "type")]
    pub tx_type: TxType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: &'static str,
    pub income: Decimal,
    pub expenses: Decimal,
    pub upcoming: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartDataset {
    pub type_totals: Vec<TypeTotal>,
    pub monthly_totals: Vec<MonthlyTotal>,
}

impl ChartDataset {
    pub fn total_for(&self, t: TxType) -> Decimal {
        self.type_totals
            .iter()
            .find(|tt| tt.tx_type == t)
            .map(|tt| tt.value)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Types with a zero total are left out of `type_totals`, so the pie never
/// shows empty segments. Months are bucketed by calendar month only and come
/// out in Jan..Dec order.
pub fn aggregate<'a, I>(transactions: I) -> ChartDataset
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_type = [Decimal::ZERO; 3];
    let mut by_month: [Option<MonthlyTotal>; 12] = Default::default();

    for t in transactions {
        let slot = TxType::ALL
            .iter()
            .position(|ty| *ty == t.tx_type)
            .unwrap_or_default();
        by_type[slot] += t.amount;

        let m = t.created_at.month0() as usize;
        let bucket = by_month[m].get_or_insert_with(|| MonthlyTotal {
            month: MONTHS[m],
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            upcoming: Decimal::ZERO,
        });
        match t.tx_type {
            TxType::Income => bucket.income += t.amount,
            TxType::Expense => bucket.expenses += t.amount,
            TxType::UpcomingExpense => bucket.upcoming += t.amount,
        }
    }

    let type_totals = TxType::ALL
        .iter()
        .zip(by_type)
        .filter(|(_, v)| !v.is_zero())
        .map(|(ty, value)| TypeTotal {
            label: ty.label(),
            value,
            tx_type: *ty,
        })
        .collect();

    ChartDataset {
        type_totals,
        monthly_totals: by_month.into_iter().flatten().collect(),
    }
}
