// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;

use crate::config::{save_api_url, Session};
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-api", sub)) => {
            let url = sub.get_one::<String>("url").unwrap().trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("API URL must start with http:// or https://");
            }
            save_api_url(conn, url)?;
            println!("API URL set to {}", url.trim_end_matches('/'));
        }
        _ => show(session),
    }
    Ok(())
}

fn show(session: &Session) {
    let source = if session.uses_backend() {
        "backend"
    } else {
        "local store"
    };
    let rows = vec![
        vec!["api_url".to_string(), session.api_url.clone()],
        vec![
            "signed_in".to_string(),
            session.token.is_some().to_string(),
        ],
        vec!["offline".to_string(), session.offline.to_string()],
        vec!["data_source".to_string(), source.to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
}
