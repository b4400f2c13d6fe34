// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Session context: where the backend lives and who we are talking as.
//!
//! Resolution order for each value is CLI flag, then environment, then the
//! `settings` table, then the built-in default.

use anyhow::Result;
use rusqlite::Connection;

use crate::utils::{clear_setting, get_setting, set_setting};

pub const DEFAULT_API_URL: &str = "http://localhost:8383/api";
pub const API_URL_ENV: &str = "INFLOW_API_URL";
pub const TOKEN_ENV: &str = "INFLOW_TOKEN";
pub const OFFLINE_ENV: &str = "INFLOW_OFFLINE";

const API_URL_KEY: &str = "api_url";
const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub api_url: String,
    pub token: Option<String>,
    /// Forces the local store for transactions and goals.
    pub offline: bool,
}

impl Session {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Session {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
            offline: false,
        }
    }

    /// Transactions and goals come from the backend only with a token and
    /// without the offline switch.
    pub fn uses_backend(&self) -> bool {
        !self.offline && self.token.is_some()
    }
}

pub fn resolve(conn: &Connection, api_url_flag: Option<&str>, offline_flag: bool) -> Result<Session> {
    let api_url = match api_url_flag {
        Some(u) => u.to_string(),
        None => match std::env::var(API_URL_ENV) {
            Ok(u) if !u.trim().is_empty() => u,
            _ => get_setting(conn, API_URL_KEY)?.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        },
    };
    let token = match std::env::var(TOKEN_ENV) {
        Ok(t) if !t.trim().is_empty() => Some(t),
        _ => get_setting(conn, TOKEN_KEY)?,
    };
    let offline = offline_flag
        || std::env::var(OFFLINE_ENV)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);
    let mut session = Session::new(api_url, token);
    session.offline = offline;
    log::debug!(
        "session: api_url={} token={} offline={}",
        session.api_url,
        session.token.is_some(),
        session.offline
    );
    Ok(session)
}

pub fn save_api_url(conn: &Connection, url: &str) -> Result<()> {
    set_setting(conn, API_URL_KEY, url.trim_end_matches('/'))
}

pub fn save_token(conn: &Connection, token: &str) -> Result<()> {
    set_setting(conn, TOKEN_KEY, token)
}

pub fn clear_token(conn: &Connection) -> Result<()> {
    clear_setting(conn, TOKEN_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn flag_wins_and_trailing_slash_is_dropped() {
        let conn = setup();
        save_api_url(&conn, "http://saved/api").unwrap();
        let s = resolve(&conn, Some("http://flag/api/"), false).unwrap();
        assert_eq!(s.api_url, "http://flag/api");
    }

    #[test]
    fn offline_flag_disables_backend() {
        let conn = setup();
        save_token(&conn, "tok").unwrap();
        let s = resolve(&conn, Some("http://h/api"), true).unwrap();
        assert!(s.offline);
        assert!(!s.uses_backend());
    }

    #[test]
    fn logout_forgets_token() {
        let conn = setup();
        save_token(&conn, "tok").unwrap();
        clear_token(&conn).unwrap();
        assert_eq!(get_setting(&conn, TOKEN_KEY).unwrap(), None);
        assert!(!Session::new("http://h", None).uses_backend());
        assert!(Session::new("http://h", Some("t".into())).uses_backend());
    }
}
