// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Assistant chat session with a one-way offline fallback.
//!
//! The session owns its connectivity state. The first failed or malformed
//! exchange flips it to [`Connectivity::Offline`]; from then on every call is
//! answered from canned replies and the transport is never touched again.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::api::{decode, ApiClient, ApiError};

pub const OFFLINE_GREETING: &str = "Hello! I'm your financial assistant, running in demo mode. \
I can't see your financial data right now, but I can still help with general questions. \
What would you like to know?";

const SPENDING_REPLY: &str = "In demo mode I can't look at your actual spending. With your data \
connected I would break your transactions down by category, point out trends, and suggest where \
you could cut back.";

const BUDGET_REPLY: &str = "A budget starts with knowing your income and expenses. With your data \
connected I would help you categorise spending and track goals. Until then, the 50/30/20 rule is a \
good start: 50% on needs, 30% on wants and 20% on savings.";

const INVEST_REPLY: &str = "Investment strategy depends on your goals and risk tolerance. I can't \
give personalised advice in demo mode, but spreading money across asset classes matters. For \
specifics, talk to a financial advisor.";

const DEFAULT_REPLY: &str = "I'm in demo mode with limited capabilities. With your data connected \
I could give personalised insights. For now, ask me about spending patterns, budgeting or \
investment basics.";

/// Canned answer for offline mode, picked by keyword.
pub fn fallback_reply(question: &str) -> &'static str {
    let q = question.to_lowercase();
    if q.contains("spend") {
        SPENDING_REPLY
    } else if q.contains("budget") {
        BUDGET_REPLY
    } else if q.contains("invest") {
        INVEST_REPLY
    } else {
        DEFAULT_REPLY
    }
}

/// Raw chat endpoints. Bodies are returned undecoded; the session validates them.
pub trait ChatTransport {
    fn initialize(&self) -> Result<String, ApiError>;
    fn message(&self, text: &str) -> Result<String, ApiError>;
    fn history(&self) -> Result<String, ApiError>;
    fn clear(&self) -> Result<String, ApiError>;
}

impl ChatTransport for ApiClient {
    fn initialize(&self) -> Result<String, ApiError> {
        self.post_raw::<serde_json::Value>("chat/initialize", None)
    }

    fn message(&self, text: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "message": text });
        self.post_raw("chat/message", Some(&body))
    }

    fn history(&self) -> Result<String, ApiError> {
        self.get_raw("chat/history")
    }

    fn clear(&self) -> Result<String, ApiError> {
        self.delete_raw("chat/clear")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub offline: bool,
}

impl ChatReply {
    fn live(message: String) -> Self {
        ChatReply {
            message,
            offline: false,
        }
    }

    fn canned(message: &str) -> Self {
        ChatReply {
            message: message.to_string(),
            offline: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    #[serde(alias = "sender")]
    pub role: String,
    #[serde(alias = "text")]
    pub content: String,
}

#[derive(Deserialize)]
struct Content {
    #[serde(deserialize_with = "non_empty")]
    content: String,
}

/// A blank reply is treated as malformed.
fn non_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let s = String::deserialize(d)?;
    if s.trim().is_empty() {
        Err(de::Error::custom("empty message"))
    } else {
        Ok(s)
    }
}

#[derive(Deserialize)]
struct MessageBody {
    message: Content,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelReply {
    Nested { data: MessageBody },
    Flat { message: Content },
}

impl ModelReply {
    fn into_text(self) -> String {
        match self {
            ModelReply::Nested { data } => data.message.content,
            ModelReply::Flat { message } => message.content,
        }
    }
}

// The greeting endpoint may also answer with a plain string message.
#[derive(Deserialize)]
#[serde(untagged)]
enum GreetingReply {
    Model(ModelReply),
    Plain {
        #[serde(deserialize_with = "non_empty")]
        message: String,
    },
}

#[derive(Deserialize)]
struct HistoryList {
    messages: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryReply {
    Nested { data: HistoryList },
    Flat(HistoryList),
}

pub struct ChatSession<T: ChatTransport> {
    transport: T,
    connectivity: Connectivity,
}

impl<T: ChatTransport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        ChatSession {
            transport,
            connectivity: Connectivity::Online,
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn is_offline(&self) -> bool {
        self.connectivity == Connectivity::Offline
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Starts the session in demo mode without trying the backend.
    pub fn force_offline(&mut self) {
        self.connectivity = Connectivity::Offline;
    }

    fn go_offline(&mut self, op: &str, err: &ApiError) {
        log::warn!("chat {} failed, switching to offline mode: {}", op, err);
        self.connectivity = Connectivity::Offline;
    }

    pub fn initialize(&mut self) -> ChatReply {
        if self.is_offline() {
            return ChatReply::canned(OFFLINE_GREETING);
        }
        let res = self
            .transport
            .initialize()
            .and_then(|b| decode::<GreetingReply>("chat/initialize", &b));
        match res {
            Ok(GreetingReply::Model(m)) => ChatReply::live(m.into_text()),
            Ok(GreetingReply::Plain { message }) => ChatReply::live(message),
            Err(e) => {
                self.go_offline("initialize", &e);
                ChatReply::canned(OFFLINE_GREETING)
            }
        }
    }

    pub fn send(&mut self, text: &str) -> ChatReply {
        if self.is_offline() {
            log::debug!("offline reply for: {}", text);
            return ChatReply::canned(fallback_reply(text));
        }
        let res = self
            .transport
            .message(text)
            .and_then(|b| decode::<ModelReply>("chat/message", &b));
        match res {
            Ok(m) => ChatReply::live(m.into_text()),
            Err(e) => {
                self.go_offline("message", &e);
                ChatReply::canned(fallback_reply(text))
            }
        }
    }

    /// Empty while offline.
    pub fn history(&mut self) -> Vec<HistoryEntry> {
        if self.is_offline() {
            return Vec::new();
        }
        let res = self
            .transport
            .history()
            .and_then(|b| decode::<HistoryReply>("chat/history", &b));
        match res {
            Ok(HistoryReply::Nested { data }) | Ok(HistoryReply::Flat(data)) => data.messages,
            Err(e) => {
                self.go_offline("history", &e);
                Vec::new()
            }
        }
    }

    /// Offline, clearing just answers with the greeting again.
    pub fn clear(&mut self) -> ChatReply {
        if self.is_offline() {
            return ChatReply::canned(OFFLINE_GREETING);
        }
        let res = self.transport.clear().and_then(|b| {
            if b.trim().is_empty() {
                Ok(None)
            } else {
                decode::<serde_json::Value>("chat/clear", &b).map(Some)
            }
        });
        match res {
            Ok(body) => {
                let message = body
                    .and_then(|v| serde_json::from_value::<GreetingReply>(v).ok())
                    .map(|r| match r {
                        GreetingReply::Model(m) => m.into_text(),
                        GreetingReply::Plain { message } => message,
                    })
                    .unwrap_or_else(|| "Conversation cleared.".to_string());
                ChatReply::live(message)
            }
            Err(e) => {
                self.go_offline("clear", &e);
                ChatReply::canned(OFFLINE_GREETING)
            }
        }
    }
}
