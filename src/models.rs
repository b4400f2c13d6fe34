// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier. The backend hands out strings, the local store
/// historically used millisecond timestamps, so both decode to the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }
        Ok(match Raw::deserialize(d)? {
            Raw::Text(s) => RecordId(s),
            Raw::Int(n) => RecordId(n.to_string()),
        })
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TxType {
    #[serde(alias = "income")]
    Income,
    #[serde(alias = "expense")]
    Expense,
    #[serde(
        alias = "upcoming expense",
        alias = "Upcoming Expense",
        alias = "upcoming"
    )]
    UpcomingExpense,
}

impl TxType {
    /// Chart order: income, expenses, upcoming.
    pub const ALL: [TxType; 3] = [TxType::Income, TxType::Expense, TxType::UpcomingExpense];

    /// Label used for chart segments.
    pub fn label(self) -> &'static str {
        match self {
            TxType::Income => "Income",
            TxType::Expense => "Expenses",
            TxType::UpcomingExpense => "Upcoming",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TxType::Income => "Income",
            TxType::Expense => "Expense",
            TxType::UpcomingExpense => "UpcomingExpense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();
        match norm.as_str() {
            "income" => Ok(TxType::Income),
            "expense" | "expenses" => Ok(TxType::Expense),
            "upcoming" | "upcomingexpense" => Ok(TxType::UpcomingExpense),
            _ => Err(anyhow::anyhow!(
                "Unknown transaction type '{}' (use income|expense|upcoming)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Always a non-negative magnitude; negative inputs are folded at decode time.
    /// Written as an exact decimal string so the local store never rounds it.
    #[serde(
        serialize_with = "magnitude::serialize_exact",
        deserialize_with = "magnitude::deserialize"
    )]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    #[serde(rename = "created_at", alias = "createdAt", alias = "date", with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn from_draft(id: RecordId, draft: &TransactionDraft) -> Self {
        Transaction {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            amount: draft.amount,
            tx_type: draft.tx_type,
            created_at: draft.created_at,
        }
    }

    /// Title for display; records from the old local store only carry a description.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.description
        } else {
            &self.title
        }
    }
}

/// Body of `POST /transactions` and `PUT /transactions/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    pub title: String,
    pub description: String,
    #[serde(with = "magnitude")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionDraft {
    fn from(t: &Transaction) -> Self {
        TransactionDraft {
            title: t.title.clone(),
            description: t.description.clone(),
            amount: t.amount,
            tx_type: t.tx_type,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        rename = "timelimit",
        alias = "timeLimit",
        alias = "time_limit",
        with = "timestamp"
    )]
    pub time_limit: DateTime<Utc>,
    #[serde(
        rename = "is_completed",
        alias = "isCompleted",
        alias = "completed",
        default
    )]
    pub is_completed: bool,
}

impl Goal {
    pub fn from_draft(id: RecordId, draft: &GoalDraft) -> Self {
        Goal {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            time_limit: draft.time_limit,
            is_completed: draft.is_completed,
        }
    }

    /// Derived on every call; never stored.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.time_limit < now
    }
}

/// Body of `POST /goals` and `PUT /goals/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalDraft {
    pub name: String,
    pub description: String,
    #[serde(rename = "timelimit", with = "timestamp")]
    pub time_limit: DateTime<Utc>,
    pub is_completed: bool,
}

impl From<&Goal> for GoalDraft {
    fn from(g: &Goal) -> Self {
        GoalDraft {
            name: g.name.clone(),
            description: g.description.clone(),
            time_limit: g.time_limit,
            is_completed: g.is_completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

mod magnitude {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Request bodies carry amounts as JSON numbers.
    pub fn serialize<S: Serializer>(v: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(v, s)
    }

    pub fn serialize_exact<S: Serializer>(v: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(v)
    }

    // Accepts numbers and numeric strings (form input was stored verbatim).
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        <Decimal as Deserialize>::deserialize(d).map(|v| v.abs())
    }
}

pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Parses RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD` (midnight UTC).
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(ndt.and_utc());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|ndt| ndt.and_utc())
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }
}
