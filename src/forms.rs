// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Form validation. A form either yields a complete draft or a set of
//! field-level messages; nothing is saved from a form that fails.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::{timestamp, GoalDraft, TransactionDraft, TxType};

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("static regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, msg: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| msg.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result<T>(self, ok: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::default();
        if self.name.trim().is_empty() {
            errs.add("name", "Name is required");
        }
        if self.email.trim().is_empty() {
            errs.add("email", "Email is required");
        } else if !EMAIL.is_match(&self.email) {
            errs.add("email", "Invalid email address");
        }
        if self.message.trim().is_empty() {
            errs.add("message", "Message cannot be empty");
        }
        errs.into_result(|| ())
    }
}

/// Raw text as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub title: String,
    pub description: String,
    pub amount: String,
    pub tx_type: String,
    /// Empty means "now".
    pub date: String,
}

impl TransactionForm {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<TransactionDraft, ValidationErrors> {
        let mut errs = ValidationErrors::default();
        if self.title.trim().is_empty() {
            errs.add("title", "Title is required");
        }
        let amount = match self.amount.trim().parse::<Decimal>() {
            Ok(a) if a.is_sign_negative() && !a.is_zero() => {
                errs.add("amount", "Amount must not be negative; pick the type instead");
                None
            }
            Ok(a) => Some(a),
            Err(_) if self.amount.trim().is_empty() => {
                errs.add("amount", "Amount is required");
                None
            }
            Err(_) => {
                errs.add("amount", "Amount must be a number");
                None
            }
        };
        let tx_type = match self.tx_type.parse::<TxType>() {
            Ok(t) => Some(t),
            Err(_) => {
                errs.add("type", "Type must be income, expense or upcoming");
                None
            }
        };
        let created_at = if self.date.trim().is_empty() {
            Some(now)
        } else {
            let parsed = timestamp::parse(&self.date);
            if parsed.is_none() {
                errs.add("date", "Date must be YYYY-MM-DD");
            }
            parsed
        };
        match (amount, tx_type, created_at) {
            (Some(amount), Some(tx_type), Some(created_at)) if errs.is_empty() => Ok(TransactionDraft {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                amount,
                tx_type,
                created_at,
            }),
            _ => Err(errs),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub name: String,
    pub description: String,
    pub time_limit: String,
    pub is_completed: bool,
}

impl GoalForm {
    pub fn validate(&self) -> Result<GoalDraft, ValidationErrors> {
        let mut errs = ValidationErrors::default();
        if self.name.trim().is_empty() {
            errs.add("name", "Name is required");
        }
        let time_limit = if self.time_limit.trim().is_empty() {
            errs.add("time_limit", "Time limit is required");
            None
        } else {
            let parsed = timestamp::parse(&self.time_limit);
            if parsed.is_none() {
                errs.add("time_limit", "Time limit must be YYYY-MM-DD");
            }
            parsed
        };
        match time_limit {
            Some(time_limit) if errs.is_empty() => Ok(GoalDraft {
                name: self.name.trim().to_string(),
                description: self.description.trim().to_string(),
                time_limit,
                is_completed: self.is_completed,
            }),
            _ => Err(errs),
        }
    }
}
