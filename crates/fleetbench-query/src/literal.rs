//! SQL literal rendering.
//!
//! Every value interpolated into query text goes through this module. There
//! is no native parameter binding for the generated workloads, so the output
//! is literal dialect text, but the quoting rules live in exactly one place:
//!
//! - strings are single-quoted with embedded `'` doubled; NUL is rejected
//! - lists are comma-joined quoted strings (`'a','b'`) and never empty
//! - floats must be finite and always carry a fractional part
//! - timestamps render as `'YYYY-MM-DDTHH:MM:SS.ffffffZ'`
//! - identifiers must match `[A-Za-z_][A-Za-z0-9_]*` and are emitted bare

use chrono::{DateTime, Utc};

use crate::error::TemplateError;

/// Timestamp literal format: fixed microsecond precision, explicit UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// A value bound into a query template.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Table or column name, emitted unquoted.
    Ident(String),
    /// Single-quoted string.
    Str(String),
    /// Comma-joined list of quoted strings, for `IN (...)`.
    StrList(Vec<String>),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Quoted timestamp.
    Timestamp(DateTime<Utc>),
}

impl Literal {
    pub fn ident(name: impl Into<String>) -> Self {
        Literal::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Literal::Str(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Literal::StrList(values.into_iter().map(Into::into).collect())
    }

    /// Renders the literal as dialect text.
    pub fn render(&self) -> Result<String, TemplateError> {
        match self {
            Literal::Ident(name) => validate_ident(name).map(|()| name.clone()),
            Literal::Str(value) => quote_str(value),
            Literal::StrList(values) => quote_list(values),
            Literal::Int(v) => Ok(v.to_string()),
            Literal::UInt(v) => Ok(v.to_string()),
            Literal::Float(v) => render_float(*v),
            Literal::Timestamp(ts) => Ok(format!("'{}'", format_timestamp(*ts))),
        }
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Literal::UInt(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Literal::Timestamp(value)
    }
}

/// Formats a timestamp without quotes.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Quotes and escapes a string literal.
pub fn quote_str(value: &str) -> Result<String, TemplateError> {
    if value.contains('\0') {
        return Err(TemplateError::NulInString(value.to_string()));
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    Ok(out)
}

/// Quotes every element and joins them with `,`.
pub fn quote_list<S: AsRef<str>>(values: &[S]) -> Result<String, TemplateError> {
    if values.is_empty() {
        return Err(TemplateError::EmptyList);
    }

    let quoted = values
        .iter()
        .map(|v| quote_str(v.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join(","))
}

fn render_float(value: f64) -> Result<String, TemplateError> {
    // `{:?}` keeps the fractional part (`6.0`), so division stays floating.
    if value.is_finite() {
        Ok(format!("{value:?}"))
    } else {
        Err(TemplateError::NonFiniteNumber(value.to_string()))
    }
}

fn validate_ident(name: &str) -> Result<(), TemplateError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(TemplateError::InvalidIdentifier(name.to_string()))
    }
}
