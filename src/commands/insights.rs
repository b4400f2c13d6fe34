// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::ApiClient;
use crate::config::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let client = ApiClient::new(session)?;
    match m.subcommand() {
        Some(("categorise", sub)) => categorise(&client, sub)?,
        Some(("summarise", sub)) => summarise(&client, sub)?,
        _ => {}
    }
    Ok(())
}

fn categorise(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let cats = match client.categorise() {
        Ok(c) => c,
        Err(e) => {
            log::error!("categorisation unavailable: {}", e);
            return Ok(());
        }
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats.categories)? {
        let rows: Vec<Vec<String>> = cats
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    c.total.as_ref().map(fmt_money).unwrap_or_default(),
                    c.transactions.len().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Total", "Transactions"], rows)
        );
    }
    Ok(())
}

fn summarise(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    match client.summarise() {
        Ok(s) => {
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                println!("{}", s.summary);
            }
        }
        Err(e) => log::error!("summary unavailable: {}", e),
    }
    Ok(())
}
