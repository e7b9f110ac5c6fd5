//! # hpack-harness
//!
//! Differential conformance and compression benchmark harness for
//! HPACK-style header codecs.
//!
//! The harness round-trips a corpus of canonical header sequences through
//! an external encoder/decoder pair and measures how compact the subject's
//! output is against the best encoding produced by independent reference
//! implementations.
//!
//! ## Pipeline
//!
//! 1. **Corpus ingestion** ([`corpus`]): parse each raw case file into an
//!    ordered header block and its uncompressed size.
//! 2. **Reference selection** ([`reference`]): across all implementation
//!    directories, pick the smallest encoding of the same case.
//! 3. **Codec drive** ([`codec`]): spawn the subject encoder/decoder as
//!    one-shot byte-stream transformers.
//! 4. **Round-trip verification** ([`verify`]): the subject's own output
//!    and the chosen reference bytes must both decode back to the
//!    canonical text, byte for byte.
//! 5. **Aggregation** ([`metrics`]): fold per-case sizes into run totals
//!    and render the report.
//!
//! Execution is strictly sequential and deterministic; any round-trip
//! divergence halts the whole run, since a single decode failure
//! invalidates trust in the aggregate numbers.

pub mod codec;
pub mod corpus;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod reference;
pub mod runner;
pub mod verify;

pub use codec::SubjectCodec;
pub use corpus::{HeaderBlock, HeaderEntry, TestCase, DEFAULT_TABLE_SIZE};
pub use error::{Error, Result};
pub use logger::{CaptureLog, Log, StderrLog, Verbosity};
pub use metrics::{AggregateMetrics, RunResult, Summary};
pub use reference::ReferenceCandidate;
pub use runner::{load_corpus, run, HarnessConfig};
