// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the Inflow backend.
//!
//! Every response body goes through [`decode`], so a missing or mistyped
//! field surfaces as [`ApiError::Schema`] instead of a half-filled value.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Session;
use crate::models::{Goal, GoalDraft, RecordId, Transaction, TransactionDraft, User};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} rejected the session token (HTTP 401)")]
    Unauthorized { url: String },
    #[error("{url} answered HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("unexpected response shape from {url}: {source}")]
    Schema {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("not signed in; run `inflow auth login` first")]
    MissingToken,
}

/// Parses a response body into `T`, tagging failures with the endpoint.
pub fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Schema {
        url: url.to_string(),
        source,
    })
}

/// Collections arrive either bare or wrapped (`{"data": [...]}`,
/// `{"transactions": [...]}`, `{"goals": [...]}`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "transactions", alias = "goals")]
        data: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(v) | Listing::Wrapped { data: v } => v,
        }
    }
}

/// Single records arrive wrapped in `data`, under their own name, or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped {
        #[serde(alias = "transaction", alias = "goal", alias = "user")]
        data: T,
    },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } | Envelope::Bare(data) => data,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategorisedItem {
    pub category: String,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub transactions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Categorisation {
    pub categories: Vec<CategorisedItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Summary {
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(session: &Session) -> anyhow::Result<Self> {
        Ok(ApiClient {
            http: crate::utils::http_client()?,
            base: session.api_url.clone(),
            token: session.token.clone(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match &self.token {
            Some(t) => Ok(req.bearer_auth(t)),
            None => Err(ApiError::MissingToken),
        }
    }

    fn send(&self, url: &str, req: RequestBuilder) -> Result<String, ApiError> {
        log::debug!("-> {}", url);
        let transport = |source| ApiError::Transport {
            url: url.to_string(),
            source,
        };
        let resp = req.send().map_err(transport)?;
        let status = resp.status();
        let body = resp.text().map_err(transport)?;
        log::debug!("<- {} {}", status.as_u16(), url);
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// Raw authenticated GET; the body is returned undecoded.
    pub fn get_raw(&self, path: &str) -> Result<String, ApiError> {
        let url = self.url(path);
        let req = self.authed(self.http.get(&url))?;
        self.send(&url, req)
    }

    pub fn post_raw<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<String, ApiError> {
        let url = self.url(path);
        let mut req = self.authed(self.http.post(&url))?;
        if let Some(b) = body {
            req = req.json(b);
        }
        self.send(&url, req)
    }

    pub fn delete_raw(&self, path: &str) -> Result<String, ApiError> {
        let url = self.url(path);
        let req = self.authed(self.http.delete(&url))?;
        self.send(&url, req)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.get_raw(path)?;
        decode(&self.url(path), &body)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let raw = self.post_raw(path, Some(body))?;
        decode(&self.url(path), &raw)
    }

    fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.url(path);
        let req = self.authed(self.http.put(&url))?.json(body);
        let raw = self.send(&url, req)?;
        decode(&url, &raw)
    }

    pub fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_json::<Listing<Transaction>>("transactions")
            .map(Listing::into_vec)
    }

    pub fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ApiError> {
        self.post_json::<_, Envelope<Transaction>>("transactions", draft)
            .map(Envelope::into_inner)
    }

    pub fn update_transaction(
        &self,
        id: &RecordId,
        draft: &TransactionDraft,
    ) -> Result<Transaction, ApiError> {
        self.put_json::<_, Envelope<Transaction>>(&format!("transactions/{}", id), draft)
            .map(Envelope::into_inner)
    }

    pub fn delete_transaction(&self, id: &RecordId) -> Result<(), ApiError> {
        self.delete_raw(&format!("transactions/{}", id)).map(|_| ())
    }

    pub fn list_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_json::<Listing<Goal>>("goals").map(Listing::into_vec)
    }

    pub fn create_goal(&self, draft: &GoalDraft) -> Result<Goal, ApiError> {
        self.post_json::<_, Envelope<Goal>>("goals", draft)
            .map(Envelope::into_inner)
    }

    pub fn update_goal(&self, id: &RecordId, draft: &GoalDraft) -> Result<Goal, ApiError> {
        self.put_json::<_, Envelope<Goal>>(&format!("goals/{}", id), draft)
            .map(Envelope::into_inner)
    }

    pub fn delete_goal(&self, id: &RecordId) -> Result<(), ApiError> {
        self.delete_raw(&format!("goals/{}", id)).map(|_| ())
    }

    pub fn categorise(&self) -> Result<Categorisation, ApiError> {
        self.get_json::<Envelope<Categorisation>>("llm/categorise")
            .map(Envelope::into_inner)
    }

    pub fn summarise(&self) -> Result<Summary, ApiError> {
        self.get_json::<Envelope<Summary>>("llm/summarise")
            .map(Envelope::into_inner)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.post_unauthenticated("auth/login", &body)
    }

    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = serde_json::json!({ "username": username, "email": email, "password": password });
        self.post_unauthenticated("auth/register", &body)
    }

    pub fn profile(&self) -> Result<User, ApiError> {
        self.get_json::<Envelope<User>>("auth/profile")
            .map(Envelope::into_inner)
    }

    fn post_unauthenticated<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let req = self.http.post(&url).json(body);
        let raw = self.send(&url, req)?;
        decode(&url, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let c = ApiClient::new(&Session::new("http://h/api/", None)).unwrap();
        assert_eq!(c.url("/transactions"), "http://h/api/transactions");
        assert_eq!(c.url("goals/7"), "http://h/api/goals/7");
    }

    #[test]
    fn missing_token_blocks_authenticated_calls() {
        let c = ApiClient::new(&Session::new("http://127.0.0.1:9", None)).unwrap();
        assert!(matches!(c.list_goals(), Err(ApiError::MissingToken)));
    }
}
