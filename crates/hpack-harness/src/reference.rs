//! Reference selection
//!
//! Scans every reference implementation's copy of a test case and picks
//! the one with the smallest total encoded byte length as the comparison
//! baseline for that case.

use std::path::Path;

use crate::corpus::{self, TestFile};
use crate::error::{Error, Result};
use crate::logger::Log;

/// Directory under the corpus root holding the raw case definitions.
///
/// It is the only subdirectory excluded from the reference scan.
pub const RAW_DATA_DIR: &str = "raw-data";

/// One reference implementation's encoding of a test case.
///
/// Ephemeral: exists only while the selector scans candidates.
#[derive(Debug, Clone)]
pub struct ReferenceCandidate {
    pub source: String,
    pub bytes: Vec<u8>,
}

/// List reference implementation directory names under the corpus root.
///
/// Sorted lexically so selection (including tie-breaks) is deterministic
/// regardless of platform listing order.
pub fn list_implementations(corpus_root: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(corpus_root).map_err(|e| Error::Read {
        path: corpus_root.display().to_string(),
        source: e,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::Read {
            path: corpus_root.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name != RAW_DATA_DIR {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Concatenate the decoded `wire` bytes of every sub-case, in case order.
///
/// Returns `None` if any sub-case lacks a `wire` field: the whole
/// implementation is then non-participating for this test, not a
/// zero-length contribution.
fn concat_wires(file: &TestFile, path: &Path) -> Result<Option<Vec<u8>>> {
    let mut bytes = Vec::new();
    for case in &file.cases {
        match &case.wire {
            Some(wire) => {
                let decoded = hex::decode(wire).map_err(|e| Error::WireHex {
                    path: path.display().to_string(),
                    source: e,
                })?;
                bytes.extend_from_slice(&decoded);
            }
            None => return Ok(None),
        }
    }
    Ok(Some(bytes))
}

/// Pick the smallest reference encoding for `test_name`.
///
/// Linear scan over the sorted implementation list, keeping a running
/// minimum by byte length; a tie goes to the lexically first name.
/// Returns `Ok(None)` when no implementation provides usable wire data,
/// which the caller reports and skips rather than treating as fatal.
pub fn select_best(
    corpus_root: &Path,
    test_name: &str,
    log: &dyn Log,
) -> Result<Option<ReferenceCandidate>> {
    let mut best: Option<ReferenceCandidate> = None;

    for source in list_implementations(corpus_root)? {
        let path = corpus_root.join(&source).join(test_name);
        if !path.is_file() {
            continue;
        }

        let file = corpus::load_test_file(&path)?;
        let Some(bytes) = concat_wires(&file, &path)? else {
            log.warn(&format!("no wire data for {} in {}", test_name, source));
            continue;
        };

        log.detail(&format!(
            "{}: candidate {} encodes to {} bytes",
            test_name,
            source,
            bytes.len()
        ));

        let smaller = best
            .as_ref()
            .is_none_or(|current| bytes.len() < current.bytes.len());
        if smaller {
            best = Some(ReferenceCandidate { source, bytes });
        }
    }

    Ok(best)
}
