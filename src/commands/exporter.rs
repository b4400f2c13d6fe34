// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use serde_json::json;

use crate::commands::apply_filter_args;
use crate::store::Ledger;
use crate::view::AnalysisView;

pub fn handle(ledger: &dyn Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_transactions(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let mut view = AnalysisView::new();
    if !view.refresh(ledger) {
        bail!("Could not load transactions; nothing exported");
    }
    apply_filter_args(&mut view, sub)?;
    let rows = view.filtered();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(["id", "date", "title", "description", "type", "amount"])?;
        for t in &rows {
            wtr.write_record([
                t.id.to_string(),
                t.created_at.date_naive().to_string(),
                t.title.clone(),
                t.description.clone(),
                t.tx_type.to_string(),
                t.amount.to_string(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = rows
            .iter()
            .map(|t| {
                json!({
                    "id": t.id, "date": t.created_at.date_naive().to_string(), "title": t.title,
                    "description": t.description, "type": t.tx_type, "amount": t.amount.to_string()
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
