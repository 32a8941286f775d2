//! Provider error taxonomy
//!
//! Callers need to tell "no data" apart from "transient failure" and
//! "malformed response"; collapsing them into one falsy default is exactly
//! what this type exists to avoid.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The symbol is unknown or its history is empty
    #[error("no data for symbol")]
    NotFound,

    /// Network or HTTP-level failure; usually transient
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered, but not in the shape we expect
    #[error("malformed response: {0}")]
    Malformed(String),
}
