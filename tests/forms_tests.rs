// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use inflow::forms::{ContactForm, GoalForm, TransactionForm};
use inflow::models::TxType;
use rust_decimal::Decimal;

fn contact(name: &str, email: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.into(),
        email: email.into(),
        message: message.into(),
    }
}

#[test]
fn contact_form_reports_each_field() {
    let errs = contact(" ", "", "").validate().unwrap_err();
    assert_eq!(errs.len(), 3);
    assert_eq!(errs.get("email"), Some("Email is required"));

    let errs = contact("Ana", "ana@example", "hi").validate().unwrap_err();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs.get("email"), Some("Invalid email address"));

    assert!(contact("Ana", "ana@example.com", "hi").validate().is_ok());
}

#[test]
fn transaction_form_builds_a_draft() {
    let now = Utc.with_ymd_and_hms(2024, 4, 2, 12, 0, 0).unwrap();
    let form = TransactionForm {
        title: " Groceries ".into(),
        description: "weekly".into(),
        amount: "82.10".into(),
        tx_type: "Expense".into(),
        date: String::new(),
    };
    let d = form.validate(now).unwrap();
    assert_eq!(d.title, "Groceries");
    assert_eq!(d.amount, Decimal::new(8210, 2));
    assert_eq!(d.tx_type, TxType::Expense);
    assert_eq!(d.created_at, now);

    let dated = TransactionForm {
        date: "2024-03-30".into(),
        tx_type: "upcoming".into(),
        ..form
    };
    let d = dated.validate(now).unwrap();
    assert_eq!(d.tx_type, TxType::UpcomingExpense);
    assert_eq!(d.created_at.date_naive().to_string(), "2024-03-30");
}

#[test]
fn transaction_form_rejects_bad_input() {
    let now = Utc::now();
    let form = TransactionForm {
        title: String::new(),
        description: String::new(),
        amount: "ten".into(),
        tx_type: "transfer".into(),
        date: "31/12/2024".into(),
    };
    let errs = form.validate(now).unwrap_err();
    for field in ["title", "amount", "type", "date"] {
        assert!(errs.get(field).is_some(), "missing error for {}", field);
    }

    let negative = TransactionForm {
        title: "Refund".into(),
        amount: "-3".into(),
        tx_type: "income".into(),
        ..Default::default()
    };
    let errs = negative.validate(now).unwrap_err();
    assert_eq!(errs.len(), 1);
    assert!(errs.to_string().starts_with("amount:"));
}

#[test]
fn goal_form_requires_name_and_deadline() {
    let errs = GoalForm::default().validate().unwrap_err();
    assert!(errs.get("name").is_some());
    assert!(errs.get("time_limit").is_some());

    let g = GoalForm {
        name: "Laptop".into(),
        time_limit: "2025-09-01".into(),
        ..Default::default()
    }
    .validate()
    .unwrap();
    assert_eq!(g.name, "Laptop");
    assert!(!g.is_completed);
    assert_eq!(g.time_limit.date_naive().to_string(), "2025-09-01");
}
