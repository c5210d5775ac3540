//! Query generation error types.

use fleetbench_context::SamplingError;

/// Errors from assembling query text out of a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The template names a placeholder nothing was bound to.
    #[error("unbound placeholder {{{0}}}")]
    UnboundPlaceholder(String),

    /// A value was bound that the template never uses.
    #[error("binding {0} is not used by the template")]
    UnusedBinding(String),

    /// A `{` without its closing `}`.
    #[error("unterminated placeholder at byte {0}")]
    UnterminatedPlaceholder(usize),

    /// String literals cannot carry NUL bytes.
    #[error("string literal contains a NUL byte: {0:?}")]
    NulInString(String),

    /// `IN ()` is not valid; lists need at least one element.
    #[error("list literal is empty")]
    EmptyList,

    /// NaN and infinities have no literal form.
    #[error("numeric literal is not finite: {0}")]
    NonFiniteNumber(String),

    /// Identifiers are restricted to `[A-Za-z_][A-Za-z0-9_]*`.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Errors from generating one query.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Drawing a parameter failed.
    #[error("failed to sample query parameters: {0}")]
    Sampling(#[from] SamplingError),

    /// Assembling the text failed.
    #[error("failed to assemble query text: {0}")]
    Template(#[from] TemplateError),

    /// No scenario is registered under this id.
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    /// The batch worker pool could not be started.
    #[error("failed to start generation workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors from handing a generated query to an emitter.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode query record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for query generation.
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
