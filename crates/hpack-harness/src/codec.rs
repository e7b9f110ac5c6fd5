//! Codec driver
//!
//! Invokes the subject encoder and decoder as external one-shot byte-stream
//! transformers: the full input is written, the full output is read, and
//! the process is waited on synchronously. There is no streaming, partial
//! consumption, or timeout; a hung subject stalls the run.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::corpus::HeaderBlock;
use crate::error::{Error, Result};

/// Run `program` as a bounded request/response exchange.
///
/// Feeds `input` on stdin, drains stdout to EOF, and waits for exit.
/// Abnormal termination is fatal and carries the captured stderr.
pub fn run_transformer(program: &Path, input: &[u8]) -> Result<Vec<u8>> {
    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Spawn {
            program: program.display().to_string(),
            source: e,
        })?;

    // Feed stdin from a helper thread so a child that emits output before
    // draining its input cannot deadlock against a full pipe.
    let feeder = child.stdin.take().map(|mut stdin| {
        let input = input.to_vec();
        thread::spawn(move || {
            let _ = stdin.write_all(&input);
        })
    });

    let output = child.wait_with_output().map_err(|e| Error::Spawn {
        program: program.display().to_string(),
        source: e,
    })?;

    if let Some(handle) = feeder {
        let _ = handle.join();
    }

    if !output.status.success() {
        return Err(Error::Subprocess {
            program: program.display().to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(output.stdout)
}

/// The encoder/decoder pair under test.
///
/// The decoder is optional: an encode-only run never spawns it.
#[derive(Debug, Clone)]
pub struct SubjectCodec {
    pub encoder: PathBuf,
    pub decoder: Option<PathBuf>,
}

impl SubjectCodec {
    pub fn new(encoder: PathBuf, decoder: Option<PathBuf>) -> Self {
        Self { encoder, decoder }
    }

    /// Encode a header block, returning the bytes and the wall-clock time
    /// of the full exchange. The elapsed time is purely diagnostic.
    pub fn encode(&self, headers: &HeaderBlock) -> Result<(Vec<u8>, Duration)> {
        let input = headers.canonical_text();
        let start = Instant::now();
        let encoded = run_transformer(&self.encoder, input.as_bytes())?;
        Ok((encoded, start.elapsed()))
    }

    /// Decode an encoded byte sequence back to serialized header text.
    pub fn decode(&self, encoded: &[u8]) -> Result<String> {
        let decoder = self.decoder.as_deref().ok_or(Error::DecoderMissing)?;
        let output = run_transformer(decoder, encoded)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::HeaderEntry;

    fn cat() -> Option<PathBuf> {
        let path = PathBuf::from("/bin/cat");
        if path.exists() {
            Some(path)
        } else {
            eprintln!("Skipping: /bin/cat not found");
            None
        }
    }

    #[test]
    fn test_run_transformer_passes_bytes_through() {
        let Some(cat) = cat() else { return };
        let out = run_transformer(&cat, b"a: 1\n").unwrap();
        assert_eq!(out, b"a: 1\n");
    }

    #[test]
    fn test_encode_serializes_headers_and_times() {
        let Some(cat) = cat() else { return };
        let mut block = HeaderBlock::new();
        block.push(HeaderEntry {
            name: "content-type".into(),
            value: "text/html".into(),
        });

        let codec = SubjectCodec::new(cat, None);
        let (bytes, _elapsed) = codec.encode(&block).unwrap();
        assert_eq!(bytes, b"content-type: text/html\n");
    }

    #[test]
    fn test_decode_without_decoder_fails() {
        let codec = SubjectCodec::new(PathBuf::from("/bin/cat"), None);
        let err = codec.decode(b"\x82").unwrap_err();
        assert!(matches!(err, Error::DecoderMissing));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err =
            run_transformer(Path::new("/nonexistent/encoder"), b"").unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn test_abnormal_exit_is_fatal() {
        let path = Path::new("/bin/false");
        if !path.exists() {
            eprintln!("Skipping: /bin/false not found");
            return;
        }
        let err = run_transformer(path, b"input").unwrap_err();
        match err {
            Error::Subprocess { program, status, .. } => {
                assert_eq!(program, "/bin/false");
                assert!(!status.success());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
