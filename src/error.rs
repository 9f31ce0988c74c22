//! Error types shared by the topic-model sampler, the corpus loader and the CLI.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a corpus or running the sampler.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected configuration; raised before any sampling work is done.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The corpus has no documents or no tokens.
    #[error("corpus contains no tokens")]
    EmptyCorpus,

    /// No sweep satisfied `s > burnin && s % interval == 0`, so there is
    /// nothing to average.
    #[error(
        "no sweep qualified for averaging (nsamples = {nsamples}, burnin = {burnin}, interval = {interval})"
    )]
    NoQualifyingSweeps {
        nsamples: usize,
        burnin: usize,
        interval: usize,
    },

    /// A quantity left its mathematical domain (non-finite or non-positive).
    #[error("numerical domain error: {quantity} = {value}")]
    NumericalDomain { quantity: &'static str, value: f64 },

    /// A (document, position) pair that was never registered during initialization.
    #[error("unknown token: document {doc}, position {pos}")]
    UnknownToken { doc: usize, pos: usize },

    /// Malformed corpus record.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
