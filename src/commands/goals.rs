// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::config::Session;
use crate::forms::GoalForm;
use crate::models::{Goal, RecordId};
use crate::store::{open_ledger, Ledger};
use crate::utils::{maybe_print_json, pretty_table};
use crate::view::GoalsView;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let ledger = open_ledger(session, conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            add(ledger.as_ref(), sub)?;
        }
        Some(("edit", sub)) => {
            edit(ledger.as_ref(), sub)?;
        }
        Some(("delete", sub)) => {
            let id = id_arg(sub);
            ledger.delete_goal(&id)?;
            println!("Deleted goal {}", id);
        }
        Some(("toggle", sub)) => {
            let g = ledger.toggle_goal(&id_arg(sub))?;
            let state = if g.is_completed { "completed" } else { "open" };
            println!("Goal '{}' is now {}", g.name, state);
        }
        Some(("list", sub)) => list(ledger.as_ref(), sub)?,
        _ => {}
    }
    Ok(())
}

fn id_arg(sub: &clap::ArgMatches) -> RecordId {
    RecordId::from(sub.get_one::<String>("id").unwrap().as_str())
}

pub fn add(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<Goal> {
    let form = GoalForm {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
        time_limit: sub
            .get_one::<String>("time-limit")
            .cloned()
            .unwrap_or_default(),
        is_completed: false,
    };
    let draft = form
        .validate()
        .map_err(|e| anyhow!("Goal not saved: {}", e))?;
    let g = ledger.create_goal(&draft)?;
    println!(
        "Added goal '{}' due {} (id {})",
        g.name,
        g.time_limit.date_naive(),
        g.id
    );
    Ok(g)
}

pub fn edit(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<Goal> {
    let id = id_arg(sub);
    let current = ledger.goal(&id)?;
    let form = GoalForm {
        name: sub
            .get_one::<String>("name")
            .cloned()
            .unwrap_or_else(|| current.name.clone()),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_else(|| current.description.clone()),
        time_limit: sub
            .get_one::<String>("time-limit")
            .cloned()
            .unwrap_or_else(|| current.time_limit.to_rfc3339()),
        is_completed: current.is_completed,
    };
    let draft = form
        .validate()
        .map_err(|e| anyhow!("Goal not saved: {}", e))?;
    let g = ledger.update_goal(&id, &draft)?;
    println!("Updated goal {}", g.id);
    Ok(g)
}

#[derive(Debug, Serialize)]
pub struct GoalRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub time_limit: String,
    pub completed: bool,
    pub overdue: bool,
}

impl GoalRow {
    pub fn new(g: &Goal, now: DateTime<Utc>) -> Self {
        GoalRow {
            id: g.id.to_string(),
            name: g.name.clone(),
            description: g.description.clone(),
            time_limit: g.time_limit.date_naive().to_string(),
            completed: g.is_completed,
            overdue: g.is_overdue(now),
        }
    }
}

pub fn query_rows(ledger: &dyn Ledger, overdue_only: bool, now: DateTime<Utc>) -> Vec<GoalRow> {
    let mut view = GoalsView::new();
    view.refresh(ledger);
    view.goals()
        .iter()
        .filter(|g| !overdue_only || g.is_overdue(now))
        .map(|g| GoalRow::new(g, now))
        .collect()
}

fn list(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let rows = query_rows(ledger, sub.get_flag("overdue"), Utc::now());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                let status = if r.completed {
                    "done"
                } else if r.overdue {
                    "overdue"
                } else {
                    "open"
                };
                vec![
                    r.id.clone(),
                    status.to_string(),
                    r.name.clone(),
                    r.description.clone(),
                    r.time_limit.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Status", "Name", "Description", "Time limit"], data)
        );
    }
    Ok(())
}
