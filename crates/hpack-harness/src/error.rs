//! Error types for the conformance harness

use thiserror::Error;

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the harness
///
/// Fatal errors carry enough payload (paths, raw bytes in hex, both text
/// forms) to diagnose a failure without rerunning with extra flags.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Corpus violation: header names must arrive already lowercased
    #[error("header name {name:?} in {test} is not lowercase")]
    HeaderCase { test: String, name: String },

    /// I/O failure while reading corpus data
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed corpus JSON
    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `wire` field that is present but not valid hexadecimal
    #[error("invalid wire hex in {path}: {source}")]
    WireHex {
        path: String,
        #[source]
        source: hex::FromHexError,
    },

    /// The subject executable could not be started or waited on
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The subject executable terminated abnormally
    #[error("{program} failed ({status}): {stderr}")]
    Subprocess {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// A decode pass was requested without a decoder executable
    #[error("no decoder configured but a decode pass was requested")]
    DecoderMissing,

    /// Decoded output diverged from the canonical header text
    ///
    /// Fatal for the whole run: one divergence invalidates trust in all
    /// subsequent aggregate numbers.
    #[error(
        "round-trip mismatch at {context}\n  encoded:  {encoded_hex}\n  decoded:  {actual:?}\n  expected: {expected:?}"
    )]
    RoundTrip {
        context: String,
        encoded_hex: String,
        actual: String,
        expected: String,
    },

    /// Failure writing the per-case report
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}
