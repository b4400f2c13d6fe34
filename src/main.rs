// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use inflow::{cli, commands, config, db, store};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let session = config::resolve(
        &conn,
        matches.get_one::<String>("api-url").map(String::as_str),
        matches.get_flag("offline"),
    )?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("config", sub)) => commands::session::handle(&conn, &session, sub)?,
        Some(("auth", sub)) => commands::auth::handle(&conn, &session, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &session, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, &session, sub)?,
        Some(("analysis", sub)) => commands::analysis::handle(&conn, &session, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, &session, sub)?,
        Some(("insights", sub)) => commands::insights::handle(&session, sub)?,
        Some(("chat", sub)) => commands::chat::handle(&session, sub)?,
        Some(("contact", sub)) => commands::contact::handle(sub)?,
        Some(("export", sub)) => {
            let ledger = store::open_ledger(&session, &conn)?;
            commands::exporter::handle(ledger.as_ref(), sub)?
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
