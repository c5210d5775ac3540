//! Minimal client for QuestDB's `/exec` REST endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LoaderError, Result};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One column of a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
}

/// Body returned by `/exec`. Every field is optional on the wire; DDL
/// responses carry only `ddl`, errors carry only `query` and `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    pub query: String,
    pub columns: Vec<QueryColumn>,
    pub dataset: Vec<Vec<serde_json::Value>>,
    pub count: u64,
    pub error: String,
}

impl QueryResponse {
    /// Parses a response body. A non-empty `error` field is a
    /// [`LoaderError::Remote`].
    pub fn from_body(body: &str) -> Result<Self> {
        let response: QueryResponse = serde_json::from_str(body)?;
        if response.error.is_empty() {
            Ok(response)
        } else {
            Err(LoaderError::Remote(response.error))
        }
    }
}

/// Blocking client bound to one QuestDB HTTP endpoint.
#[derive(Debug, Clone)]
pub struct RestClient {
    root: String,
    agent: ureq::Agent,
}

impl RestClient {
    /// Creates a client. A trailing `/` on `endpoint` is ignored.
    pub fn new(endpoint: &str) -> Result<Self> {
        let root = endpoint.trim().trim_end_matches('/');
        if !root.starts_with("http://") || root.len() == "http://".len() {
            return Err(LoaderError::InvalidEndpoint(endpoint.to_string()));
        }

        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Ok(Self {
            root: root.to_string(),
            agent,
        })
    }

    /// Endpoint root without the trailing `/`.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// URL statements are sent to.
    pub fn exec_url(&self) -> String {
        format!("{}/exec", self.root)
    }

    /// Runs one statement and returns its decoded result.
    pub fn exec(&self, sql: &str) -> Result<QueryResponse> {
        let url = self.exec_url();
        debug!(url = %url, sql, "executing statement");

        match self.agent.get(&url).query("query", sql).call() {
            Ok(response) => QueryResponse::from_body(&response.into_string()?),
            // QuestDB reports SQL errors as a JSON body on a 4xx status.
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string()?;
                warn!(status, sql, "statement rejected");
                match serde_json::from_str::<QueryResponse>(&body) {
                    Ok(decoded) if !decoded.error.is_empty() => {
                        Err(LoaderError::Remote(decoded.error))
                    }
                    _ => Err(LoaderError::Http { status, body }),
                }
            }
            Err(ureq::Error::Transport(source)) => Err(LoaderError::Transport {
                url,
                source: Box::new(source),
            }),
        }
    }
}
