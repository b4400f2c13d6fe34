// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;

use crate::api::{ApiClient, ApiError, AuthResponse};
use crate::config::{clear_token, save_token, Session};

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let client = ApiClient::new(session)?;
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let auth = client.login(email, password)?;
            remember(conn, &auth)?;
        }
        Some(("register", sub)) => {
            let client = ApiClient::new(session)?;
            let auth = client.register(
                sub.get_one::<String>("username").unwrap(),
                sub.get_one::<String>("email").unwrap(),
                sub.get_one::<String>("password").unwrap(),
            )?;
            remember(conn, &auth)?;
        }
        Some(("profile", _)) => profile(conn, session)?,
        Some(("logout", _)) => {
            clear_token(conn)?;
            println!("Signed out");
        }
        _ => {}
    }
    Ok(())
}

fn remember(conn: &Connection, auth: &AuthResponse) -> Result<()> {
    save_token(conn, &auth.token)?;
    let who = if auth.user.username.is_empty() {
        &auth.user.email
    } else {
        &auth.user.username
    };
    println!("Signed in as {}", who);
    Ok(())
}

/// A rejected token clears the stored session.
fn profile(conn: &Connection, session: &Session) -> Result<()> {
    let client = ApiClient::new(session)?;
    match client.profile() {
        Ok(user) => {
            println!("{} <{}> (id {})", user.username, user.email, user.id);
            Ok(())
        }
        Err(ApiError::Unauthorized { .. }) => {
            clear_token(conn)?;
            bail!("Session expired; signed out. Run `inflow auth login` again.")
        }
        Err(e) => Err(e.into()),
    }
}
