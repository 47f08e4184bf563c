//! Embeds a self-consistent CRC32 checksum into a file.
//!
//! The input reserves a span with a literal placeholder marker; this crate
//! searches the 32-bit space for a value whose 8-character lowercase hex
//! rendering, spliced over that span, makes the CRC32 of the resulting file
//! equal the value itself, then writes the spliced file back in place.

use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub mod checksum;
pub mod error;
pub mod logging;
pub mod marker;
pub mod search;

pub use error::{EmbedError, EmbedResult};
pub use search::{SearchConfig, SearchOutcome};

/// Terminal outcome of an embedding run.
#[derive(Debug)]
pub enum EmbedOutcome {
    /// A fixed point was found and written back to the file.
    Found {
        value: u32,
        attempts: u64,
        elapsed: Duration,
    },
    /// The full candidate space was tried without a hit. A valid negative
    /// result, not a failure.
    Exhausted { attempts: u64, elapsed: Duration },
}

/// Embed a fixed-point checksum into the file at `path` using a search
/// sized to the detected hardware parallelism.
pub fn embed(path: &Path) -> EmbedResult<EmbedOutcome> {
    embed_with_config(path, &SearchConfig::detect())
}

/// Embed with an explicit search configuration.
///
/// Reads the file once, locates the placeholder, runs the parallel search,
/// and on success overwrites the file with the spliced content
/// (truncate-then-write; a crash mid-write can corrupt the file, acceptable
/// for an offline build-time tool).
pub fn embed_with_config(path: &Path, config: &SearchConfig) -> EmbedResult<EmbedOutcome> {
    let content = fs::read(path).map_err(|source| EmbedError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let pos = marker::find(&content).ok_or_else(|| EmbedError::PlaceholderMissing {
        path: path.to_path_buf(),
    })?;
    debug!(pos, file_len = content.len(), "placeholder located");

    match search::run_search(&content, pos, marker::MARKER.len(), config) {
        SearchOutcome::Found {
            value,
            output,
            attempts,
            elapsed,
        } => {
            // Log the value before touching the file so a failed write
            // never loses it.
            info!(value = format_args!("{:08x}", value), attempts, "fixed point found");
            fs::write(path, &output).map_err(|source| EmbedError::WriteFailed {
                path: path.to_path_buf(),
                value,
                source,
            })?;
            info!(path = %path.display(), "file updated");
            Ok(EmbedOutcome::Found {
                value,
                attempts,
                elapsed,
            })
        }
        SearchOutcome::Exhausted { attempts, elapsed } => {
            info!(attempts, "candidate space exhausted, no fixed point");
            Ok(EmbedOutcome::Exhausted { attempts, elapsed })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn fast_config() -> SearchConfig {
        SearchConfig {
            workers: 4,
            progress_interval: Duration::from_millis(10),
            attempts_per_worker: 200_000,
        }
    }

    fn write_temp(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_embed_end_to_end() {
        let mut content = b"HEADER".to_vec();
        content.extend_from_slice(marker::MARKER);
        content.extend_from_slice(b"FOOTER1345");
        let file = write_temp(&content);

        let outcome = embed_with_config(file.path(), &fast_config()).unwrap();
        let EmbedOutcome::Found { value, .. } = outcome else {
            panic!("expected a fixed point");
        };
        assert_eq!(value, 0x0000b757);

        // Independently rehash the written file and compare to the
        // reported value
        let written = fs::read(file.path()).unwrap();
        assert_eq!(checksum::crc32(0, &written), value);
        assert_eq!(written, b"HEADER0000b757FOOTER1345");
    }

    #[test]
    fn test_rerun_reports_placeholder_missing() {
        let mut content = b"HEADER".to_vec();
        content.extend_from_slice(marker::MARKER);
        content.extend_from_slice(b"FOOTER1345");
        let file = write_temp(&content);

        embed_with_config(file.path(), &fast_config()).unwrap();

        // The placeholder now holds a hex value, not the marker
        match embed_with_config(file.path(), &fast_config()) {
            Err(EmbedError::PlaceholderMissing { .. }) => {}
            other => panic!("expected PlaceholderMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/crc32-embed-test.bin");
        match embed_with_config(path, &fast_config()) {
            Err(EmbedError::FileUnreadable { .. }) => {}
            other => panic!("expected FileUnreadable, got {:?}", other),
        }
    }

    #[test]
    fn test_no_marker_in_file() {
        let file = write_temp(b"nothing to patch here");
        match embed_with_config(file.path(), &fast_config()) {
            Err(EmbedError::PlaceholderMissing { .. }) => {}
            other => panic!("expected PlaceholderMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_exhausted_leaves_file_untouched() {
        let mut content = b"HEADER".to_vec();
        content.extend_from_slice(marker::MARKER);
        content.extend_from_slice(b"FOOTER1345");
        let file = write_temp(&content);

        let config = SearchConfig {
            attempts_per_worker: 1_000,
            ..fast_config()
        };
        let outcome = embed_with_config(file.path(), &config).unwrap();
        assert!(matches!(outcome, EmbedOutcome::Exhausted { .. }));
        assert_eq!(fs::read(file.path()).unwrap(), content);
    }
}
