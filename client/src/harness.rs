//! Scripted demonstration run against a live item service.
//!
//! The sequence is fixed: list, create two items, fetch id 5. Each success is
//! printed as `<METHOD> <path> -> <body>`. The first failure stops the run;
//! nothing is retried and later steps are never sent.

use std::io::{self, Write};

use thiserror::Error;

use crate::client::ItemClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::NewItem;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Id fetched by the last step. Against the demo dataset (three items) it is
/// the second item the harness creates.
pub const FETCHED_ID: u64 = 5;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{label} failed: {source}")]
    Request {
        label: String,
        #[source]
        source: ApiError,
    },

    #[error("could not write report: {0}")]
    Output(#[from] io::Error),
}

impl HarnessError {
    /// Prints the failure the way an operator wants to read it: status and
    /// body for HTTP errors, a single line for transport problems.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            HarnessError::Request {
                label,
                source: ApiError::Http { status, body },
            } => {
                writeln!(out, "HTTP error: {label} returned {status}")?;
                writeln!(out, "Status: {status}")?;
                writeln!(out, "Body: {body}")
            }
            HarnessError::Request {
                label,
                source: ApiError::Transport(message),
            } => writeln!(out, "Request failed: {label}: {message}"),
            other => writeln!(out, "Request failed: {other}"),
        }
    }
}

pub struct Harness<T> {
    client: ItemClient,
    transport: T,
}

impl<T: Transport> Harness<T> {
    pub fn new(client: ItemClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// The requests issued by [`Harness::run`], in order.
    pub fn sequence(&self) -> Result<Vec<HttpRequest>, ApiError> {
        Ok(vec![
            self.client.build_list_items(None, None),
            self.client
                .build_create_item(&NewItem::new("Apple", 1.99, Some(true)))?,
            self.client
                .build_create_item(&NewItem::new("Notebook", 4.50, None))?,
            self.client.build_get_item(FETCHED_ID),
        ])
    }

    /// Runs the sequence, printing each result to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<(), HarnessError> {
        let requests = self.sequence().map_err(|source| HarnessError::Request {
            label: "building requests".to_string(),
            source,
        })?;

        for request in requests {
            let label = self.label(&request);
            tracing::debug!(step = %label, "running step");
            let body = self
                .transport
                .execute(request)
                .and_then(|response| self.client.parse_json(response))
                .map_err(|source| HarnessError::Request {
                    label: label.clone(),
                    source,
                })?;
            writeln!(out, "{label} -> {body}")?;
        }
        Ok(())
    }

    fn label(&self, request: &HttpRequest) -> String {
        let path = request
            .path
            .strip_prefix(self.client.base_url())
            .unwrap_or(&request.path);
        format!("{} {path}", request.method.as_str())
    }
}
