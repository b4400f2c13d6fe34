// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where transactions and goals live: the backend or the local key-value table.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::ApiClient;
use crate::config::Session;
use crate::models::{Goal, GoalDraft, RecordId, Transaction, TransactionDraft};

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const GOALS_KEY: &str = "goals";

pub trait Ledger {
    fn transactions(&self) -> Result<Vec<Transaction>>;
    fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction>;
    fn update_transaction(&self, id: &RecordId, draft: &TransactionDraft) -> Result<Transaction>;
    fn delete_transaction(&self, id: &RecordId) -> Result<()>;

    fn goals(&self) -> Result<Vec<Goal>>;
    fn create_goal(&self, draft: &GoalDraft) -> Result<Goal>;
    fn update_goal(&self, id: &RecordId, draft: &GoalDraft) -> Result<Goal>;
    fn delete_goal(&self, id: &RecordId) -> Result<()>;

    fn transaction(&self, id: &RecordId) -> Result<Transaction> {
        self.transactions()?
            .into_iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| anyhow!("Transaction '{}' not found", id))
    }

    fn goal(&self, id: &RecordId) -> Result<Goal> {
        self.goals()?
            .into_iter()
            .find(|g| &g.id == id)
            .ok_or_else(|| anyhow!("Goal '{}' not found", id))
    }

    /// Flips completion and saves the whole goal back.
    fn toggle_goal(&self, id: &RecordId) -> Result<Goal> {
        let goal = self.goal(id)?;
        let mut draft = GoalDraft::from(&goal);
        draft.is_completed = !draft.is_completed;
        self.update_goal(id, &draft)
    }
}

impl Ledger for ApiClient {
    fn transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.list_transactions()?)
    }

    fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction> {
        Ok(ApiClient::create_transaction(self, draft)?)
    }

    fn update_transaction(&self, id: &RecordId, draft: &TransactionDraft) -> Result<Transaction> {
        Ok(ApiClient::update_transaction(self, id, draft)?)
    }

    fn delete_transaction(&self, id: &RecordId) -> Result<()> {
        Ok(ApiClient::delete_transaction(self, id)?)
    }

    fn goals(&self) -> Result<Vec<Goal>> {
        Ok(self.list_goals()?)
    }

    fn create_goal(&self, draft: &GoalDraft) -> Result<Goal> {
        Ok(ApiClient::create_goal(self, draft)?)
    }

    fn update_goal(&self, id: &RecordId, draft: &GoalDraft) -> Result<Goal> {
        Ok(ApiClient::update_goal(self, id, draft)?)
    }

    fn delete_goal(&self, id: &RecordId) -> Result<()> {
        Ok(ApiClient::delete_goal(self, id)?)
    }
}

/// JSON arrays in the `kv` table, keyed by collection name.
pub struct LocalStore<'c> {
    conn: &'c Connection,
}

impl<'c> LocalStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        LocalStore { conn }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| r.get(0))
            .optional()?;
        match raw {
            Some(s) => serde_json::from_str(&s)
                .with_context(|| format!("Corrupt local store entry '{}'", key)),
            None => Ok(Vec::new()),
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, raw],
        )?;
        Ok(())
    }

    /// Millisecond timestamp, bumped until it is unused.
    fn next_id<'a>(existing: impl Iterator<Item = &'a RecordId> + Clone) -> RecordId {
        let mut n = Utc::now().timestamp_millis();
        loop {
            let candidate = RecordId(n.to_string());
            if !existing.clone().any(|id| *id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Ledger for LocalStore<'_> {
    fn transactions(&self) -> Result<Vec<Transaction>> {
        self.load(TRANSACTIONS_KEY)
    }

    fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction> {
        let mut all: Vec<Transaction> = self.load(TRANSACTIONS_KEY)?;
        let id = Self::next_id(all.iter().map(|t| &t.id));
        let t = Transaction::from_draft(id, draft);
        all.push(t.clone());
        self.save(TRANSACTIONS_KEY, &all)?;
        Ok(t)
    }

    fn update_transaction(&self, id: &RecordId, draft: &TransactionDraft) -> Result<Transaction> {
        let mut all: Vec<Transaction> = self.load(TRANSACTIONS_KEY)?;
        let slot = all
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| anyhow!("Transaction '{}' not found", id))?;
        *slot = Transaction::from_draft(id.clone(), draft);
        let updated = slot.clone();
        self.save(TRANSACTIONS_KEY, &all)?;
        Ok(updated)
    }

    fn delete_transaction(&self, id: &RecordId) -> Result<()> {
        let mut all: Vec<Transaction> = self.load(TRANSACTIONS_KEY)?;
        let before = all.len();
        all.retain(|t| &t.id != id);
        if all.len() == before {
            return Err(anyhow!("Transaction '{}' not found", id));
        }
        self.save(TRANSACTIONS_KEY, &all)
    }

    fn goals(&self) -> Result<Vec<Goal>> {
        self.load(GOALS_KEY)
    }

    fn create_goal(&self, draft: &GoalDraft) -> Result<Goal> {
        let mut all: Vec<Goal> = self.load(GOALS_KEY)?;
        let id = Self::next_id(all.iter().map(|g| &g.id));
        let g = Goal::from_draft(id, draft);
        all.push(g.clone());
        self.save(GOALS_KEY, &all)?;
        Ok(g)
    }

    fn update_goal(&self, id: &RecordId, draft: &GoalDraft) -> Result<Goal> {
        let mut all: Vec<Goal> = self.load(GOALS_KEY)?;
        let slot = all
            .iter_mut()
            .find(|g| &g.id == id)
            .ok_or_else(|| anyhow!("Goal '{}' not found", id))?;
        *slot = Goal::from_draft(id.clone(), draft);
        let updated = slot.clone();
        self.save(GOALS_KEY, &all)?;
        Ok(updated)
    }

    fn delete_goal(&self, id: &RecordId) -> Result<()> {
        let mut all: Vec<Goal> = self.load(GOALS_KEY)?;
        let before = all.len();
        all.retain(|g| &g.id != id);
        if all.len() == before {
            return Err(anyhow!("Goal '{}' not found", id));
        }
        self.save(GOALS_KEY, &all)
    }
}

/// Backend when the session can reach it, otherwise the local table.
pub fn open_ledger<'c>(session: &Session, conn: &'c Connection) -> Result<Box<dyn Ledger + 'c>> {
    if session.uses_backend() {
        Ok(Box::new(ApiClient::new(session)?))
    } else {
        log::info!("using local store (offline or not signed in)");
        Ok(Box::new(LocalStore::new(conn)))
    }
}
