// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::api::ApiClient;
use crate::chat::{ChatReply, ChatSession, ChatTransport};
use crate::config::Session;

pub fn handle(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let mut chat = ChatSession::new(ApiClient::new(session)?);
    if session.offline {
        chat.force_offline();
    }
    match sub.get_one::<String>("message") {
        Some(q) => {
            print_reply(&chat.send(q));
            Ok(())
        }
        None => run(&mut chat, io::stdin().lock(), io::stdout().lock()),
    }
}

fn print_reply(r: &ChatReply) {
    let who = if r.offline { "assistant (demo)" } else { "assistant" };
    println!("{}> {}", who, r.message);
}

/// Line-oriented loop. `/history`, `/clear` and `/quit` are handled locally.
pub fn run<T, R, W>(chat: &mut ChatSession<T>, input: R, mut out: W) -> Result<()>
where
    T: ChatTransport,
    R: BufRead,
    W: Write,
{
    let greeting = chat.initialize();
    writeln!(out, "assistant> {}", greeting.message)?;
    write!(out, "you> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        match text {
            "" => {}
            "/quit" | "/exit" => break,
            "/history" => {
                let entries = chat.history();
                if entries.is_empty() {
                    writeln!(out, "(no history)")?;
                }
                for e in entries {
                    writeln!(out, "{}> {}", e.role, e.content)?;
                }
            }
            "/clear" => {
                let r = chat.clear();
                writeln!(out, "assistant> {}", r.message)?;
            }
            q => {
                let r = chat.send(q);
                writeln!(out, "assistant> {}", r.message)?;
            }
        }
        write!(out, "you> ")?;
        out.flush()?;
    }
    if chat.is_offline() {
        writeln!(out)?;
        writeln!(out, "(session ran in demo mode)")?;
    }
    Ok(())
}
