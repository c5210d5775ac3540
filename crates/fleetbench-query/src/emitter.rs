//! Sinks for generated queries.
//!
//! The generator produces [`GeneratedQuery`] values and hands them to a
//! [`QueryEmitter`]; the emitter owns the transport format. Query text is
//! passed through untouched.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::EmitError;
use crate::scenario::GeneratedQuery;

/// Receives generated queries in generation order.
pub trait QueryEmitter {
    /// Accepts one query.
    fn emit(&mut self, label: &str, description: &str, text: &str) -> Result<(), EmitError>;

    fn emit_query(&mut self, query: &GeneratedQuery) -> Result<(), EmitError> {
        self.emit(
            &query.human_label,
            &query.human_description,
            &query.query_text,
        )
    }
}

/// On-the-wire record written by [`JsonLinesEmitter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub human_label: String,
    pub human_description: String,
    pub query: String,
}

#[derive(Serialize)]
struct RecordRef<'a> {
    human_label: &'a str,
    human_description: &'a str,
    query: &'a str,
}

/// Writes one JSON object per line.
///
/// Multi-line query text stays on one line because JSON escapes newlines.
#[derive(Debug)]
pub struct JsonLinesEmitter<W: Write> {
    writer: W,
    emitted: u64,
}

impl<W: Write> JsonLinesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            emitted: 0,
        }
    }

    /// Records written so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn flush(&mut self) -> Result<(), EmitError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W, EmitError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> QueryEmitter for JsonLinesEmitter<W> {
    fn emit(&mut self, label: &str, description: &str, text: &str) -> Result<(), EmitError> {
        let record = RecordRef {
            human_label: label,
            human_description: description,
            query: text,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.emitted += 1;
        trace!(label, emitted = self.emitted, "emitted query");
        Ok(())
    }
}

/// Keeps every query in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingEmitter {
    queries: Vec<GeneratedQuery>,
}

impl CollectingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> &[GeneratedQuery] {
        &self.queries
    }

    pub fn into_queries(self) -> Vec<GeneratedQuery> {
        self.queries
    }
}

impl QueryEmitter for CollectingEmitter {
    fn emit(&mut self, label: &str, description: &str, text: &str) -> Result<(), EmitError> {
        self.queries.push(GeneratedQuery {
            query_text: text.to_string(),
            human_label: label.to_string(),
            human_description: description.to_string(),
        });
        Ok(())
    }
}
