//! Run driver
//!
//! Resolves every corpus case (headers plus best reference), then drives
//! the subject codec over them strictly sequentially: encode, verify the
//! subject's own output, verify the chosen reference's bytes, fold the
//! sizes into the aggregate totals. The first fatal error stops the run.

use std::io::Write;
use std::path::PathBuf;

use crate::codec::SubjectCodec;
use crate::corpus::{self, TestCase};
use crate::error::{Error, Result};
use crate::logger::Log;
use crate::metrics::{self, AggregateMetrics, RunResult, Summary};
use crate::reference::{self, RAW_DATA_DIR};
use crate::verify::verify;

/// Harness configuration.
///
/// `include_decode_pass` folds the historical encode-only and
/// encode+decode harness variants into one: with the pass disabled the
/// decoder is never required or spawned and no verification runs.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub corpus_root: PathBuf,
    pub encoder: PathBuf,
    pub decoder: Option<PathBuf>,
    pub include_decode_pass: bool,
}

/// Resolve every test case in the corpus, in sorted name order.
///
/// Cases without any usable reference encoding are reported and skipped;
/// they contribute nothing to the aggregate totals.
pub fn load_corpus(config: &HarnessConfig, log: &dyn Log) -> Result<Vec<TestCase>> {
    let raw_dir = config.corpus_root.join(RAW_DATA_DIR);
    let entries = std::fs::read_dir(&raw_dir).map_err(|e| Error::Read {
        path: raw_dir.display().to_string(),
        source: e,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::Read {
            path: raw_dir.display().to_string(),
            source: e,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".json") {
            names.push(name);
        }
    }
    names.sort();

    let mut cases = Vec::with_capacity(names.len());
    for name in names {
        let file = corpus::load_test_file(&raw_dir.join(&name))?;
        let headers = corpus::read_headers(&name, &file, log)?;

        let Some(best) = reference::select_best(&config.corpus_root, &name, log)? else {
            log.warn(&format!("skipping {}: no usable reference data", name));
            continue;
        };

        let original_size = headers.original_size();
        cases.push(TestCase {
            name,
            headers,
            original_size,
            reference_bytes: best.bytes,
            reference_source: best.source,
        });
    }

    log.detail(&format!("resolved {} test cases", cases.len()));
    Ok(cases)
}

/// Execute the full harness run, writing report lines to `out`.
pub fn run(config: &HarnessConfig, log: &dyn Log, out: &mut dyn Write) -> Result<Summary> {
    let cases = load_corpus(config, log)?;
    let codec = SubjectCodec::new(config.encoder.clone(), config.decoder.clone());
    let mut totals = AggregateMetrics::new();

    for case in &cases {
        let expected = case.headers.canonical_text();

        log.trace(&format!("{}: invoking encoder", case.name));
        let (encoded, elapsed) = codec.encode(&case.headers)?;

        if config.include_decode_pass {
            verify(
                &codec,
                &encoded,
                &expected,
                &format!("{}: subject round trip", case.name),
            )?;
            verify(
                &codec,
                &case.reference_bytes,
                &expected,
                &format!(
                    "{}: reference bytes from {}",
                    case.name, case.reference_source
                ),
            )?;
        }

        let result = RunResult {
            name: case.name.clone(),
            encoded_size: encoded.len(),
            elapsed,
            reference_delta: encoded.len() as i64 - case.reference_bytes.len() as i64,
        };
        writeln!(out, "{}", metrics::per_case_line(case, &result))?;

        totals.record(encoded.len(), case.original_size, case.reference_bytes.len());
    }

    let summary = totals.summary();
    write!(out, "{}", summary)?;
    Ok(summary)
}
