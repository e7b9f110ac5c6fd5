//! Corpus ingestion
//!
//! Loads conformance test-case files and reconstructs the canonical header
//! sequence each one describes. The corpus is a directory of implementation
//! subdirectories; the raw definitions live under `raw-data/` and each
//! reference implementation keeps a file of the same name with its own
//! encoded `wire` data (see [`crate::reference`]).

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::logger::Log;

/// Universal default HPACK dynamic-table size.
pub const DEFAULT_TABLE_SIZE: u32 = 4096;

/// One header name/value pair.
///
/// Names are required to arrive lowercase; the corpus is normalized
/// upstream and a violation is a corpus defect, never silently corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl HeaderEntry {
    /// Uncompressed size: name plus value byte lengths.
    pub fn size(&self) -> usize {
        self.name.len() + self.value.len()
    }

    /// Canonical serialized form, `"name: value\n"`.
    pub fn canonical_line(&self) -> String {
        format!("{}: {}\n", self.name, self.value)
    }
}

/// Ordered sequence of header entries.
///
/// Insertion order is significant: the block is both the compression unit
/// and the equality target for round-trip checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    entries: Vec<HeaderEntry>,
}

impl HeaderBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HeaderEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical text: one `"name: value\n"` line per entry, in order.
    pub fn canonical_text(&self) -> String {
        self.entries.iter().map(HeaderEntry::canonical_line).collect()
    }

    /// Sum of name+value byte lengths across all entries.
    pub fn original_size(&self) -> usize {
        self.entries.iter().map(HeaderEntry::size).sum()
    }
}

/// On-disk schema of one corpus JSON file.
#[derive(Debug, Deserialize)]
pub struct TestFile {
    pub cases: Vec<SubCase>,
}

/// One sub-case inside a corpus file.
///
/// Each element of `headers` is a single-entry name-to-value object.
/// Reference implementations additionally fill `wire` with the hex of
/// their encoding of that sub-case.
#[derive(Debug, Deserialize)]
pub struct SubCase {
    #[serde(default)]
    pub headers: Vec<BTreeMap<String, String>>,
    pub header_table_size: Option<u32>,
    pub wire: Option<String>,
}

/// A fully resolved test case, ready for the codec driver.
///
/// Built once from the raw corpus entry plus the best reference encoding;
/// immutable afterward and consumed exactly once.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub headers: HeaderBlock,
    pub original_size: usize,
    pub reference_bytes: Vec<u8>,
    pub reference_source: String,
}

/// Read and parse one corpus JSON file.
pub fn load_test_file(path: &Path) -> Result<TestFile> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| Error::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Reconstruct the canonical header block of a raw corpus file.
///
/// Appends every header pair across all sub-cases, in order. Fails on a
/// non-lowercase name. A declared table size other than 4096 is only
/// warned about: the harness does not vary its table-size assumptions.
pub fn read_headers(name: &str, file: &TestFile, log: &dyn Log) -> Result<HeaderBlock> {
    let mut block = HeaderBlock::new();

    for case in &file.cases {
        for kv in &case.headers {
            for (k, v) in kv {
                if *k != k.to_lowercase() {
                    return Err(Error::HeaderCase {
                        test: name.to_string(),
                        name: k.clone(),
                    });
                }
                block.push(HeaderEntry {
                    name: k.clone(),
                    value: v.clone(),
                });
            }
        }

        let table_size = case.header_table_size.unwrap_or(DEFAULT_TABLE_SIZE);
        if table_size != DEFAULT_TABLE_SIZE {
            log.warn(&format!(
                "WARNING: {} has custom table size: {}",
                name, table_size
            ));
        }
    }

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::CaptureLog;
    use std::fs;
    use tempfile::TempDir;

    fn parse(json: &str) -> TestFile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_canonical_text_and_size() {
        let file = parse(
            r#"{"cases":[{"headers":[
                {"content-type":"text/html"},
                {"content-length":"42"}
            ]}]}"#,
        );
        let log = CaptureLog::new();
        let block = read_headers("story_00", &file, &log).unwrap();

        assert_eq!(block.len(), 2);
        assert_eq!(
            block.canonical_text(),
            "content-type: text/html\ncontent-length: 42\n"
        );
        // 12 + 9 + 14 + 2
        assert_eq!(block.original_size(), 37);
        assert!(log.messages().is_empty());
    }

    #[test]
    fn test_order_preserved_across_sub_cases() {
        let file = parse(
            r#"{"cases":[
                {"headers":[{"b":"2"}]},
                {"headers":[{"a":"1"}]}
            ]}"#,
        );
        let log = CaptureLog::new();
        let block = read_headers("t", &file, &log).unwrap();
        assert_eq!(block.canonical_text(), "b: 2\na: 1\n");
    }

    #[test]
    fn test_uppercase_name_is_fatal() {
        let file = parse(r#"{"cases":[{"headers":[{"Content-Type":"x"}]}]}"#);
        let log = CaptureLog::new();
        let err = read_headers("t", &file, &log).unwrap_err();
        match err {
            Error::HeaderCase { test, name } => {
                assert_eq!(test, "t");
                assert_eq!(name, "Content-Type");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_custom_table_size_warns_but_continues() {
        let file = parse(
            r#"{"cases":[{"header_table_size":256,"headers":[{"a":"1"}]}]}"#,
        );
        let log = CaptureLog::new();
        let block = read_headers("t", &file, &log).unwrap();
        assert_eq!(block.len(), 1);
        assert!(log.contains("custom table size: 256"));
    }

    #[test]
    fn test_default_table_size_is_silent() {
        let file = parse(
            r#"{"cases":[{"header_table_size":4096,"headers":[{"a":"1"}]}]}"#,
        );
        let log = CaptureLog::new();
        read_headers("t", &file, &log).unwrap();
        assert!(log.messages().is_empty());
    }

    #[test]
    fn test_empty_case_has_zero_size() {
        let file = parse(r#"{"cases":[{"headers":[]}]}"#);
        let log = CaptureLog::new();
        let block = read_headers("t", &file, &log).unwrap();
        assert!(block.is_empty());
        assert_eq!(block.original_size(), 0);
        assert_eq!(block.canonical_text(), "");
    }

    #[test]
    fn test_load_test_file_bad_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        let err = load_test_file(&path).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn test_load_test_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = load_test_file(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_load_test_file_with_wire() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.json");
        fs::write(
            &path,
            r#"{"cases":[{"headers":[{"a":"1"}],"wire":"82"}]}"#,
        )
        .unwrap();

        let file = load_test_file(&path).unwrap();
        assert_eq!(file.cases.len(), 1);
        assert_eq!(file.cases[0].wire.as_deref(), Some("82"));
    }
}
