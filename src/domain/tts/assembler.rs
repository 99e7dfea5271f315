use std::path::Path;

use super::dto::AudioEncoding;
use super::error::SynthesisError;

/// Concatenate per-chunk audio payloads in ascending chunk order.
///
/// The caller passes payloads already sorted by chunk index (the orchestrator
/// collects them into index-ordered slots); the assembled length is exactly
/// the sum of the constituent chunk lengths.
pub fn assemble(payloads: Vec<Vec<u8>>) -> Vec<u8> {
    let total: usize = payloads.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);
    for payload in payloads {
        merged.extend(payload);
    }
    merged
}

/// Output filename for a synthesis request: base name plus encoding extension
pub fn output_filename(base: &str, encoding: AudioEncoding) -> String {
    format!("{base}.{}", encoding.as_str())
}

/// Persist assembled audio in a single write.
pub async fn write_audio_file(path: &Path, bytes: &[u8]) -> Result<(), SynthesisError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| SynthesisError::Write(format!("{}: {e}", path.display())))?;

    tracing::info!(
        filename = %path.display(),
        audio_size_bytes = bytes.len(),
        "Saved audio file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn assemble_preserves_order_and_length() {
        let payloads = vec![vec![1u8, 2, 3], vec![4u8, 5], vec![6u8]];
        let expected_len: usize = payloads.iter().map(Vec::len).sum();

        let merged = assemble(payloads);

        assert_eq!(merged, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(merged.len(), expected_len);
    }

    #[test]
    fn assemble_tolerates_empty_payloads() {
        let merged = assemble(vec![vec![], vec![9u8], vec![]]);
        assert_eq!(merged, vec![9]);
    }

    #[test]
    fn output_filename_appends_the_extension() {
        assert_eq!(output_filename("speech", AudioEncoding::Mp3), "speech.mp3");
        assert_eq!(output_filename("test", AudioEncoding::Flac), "test.flac");
        assert_eq!(
            output_filename("/tmp/out/clip", AudioEncoding::Opus),
            "/tmp/out/clip.opus"
        );
    }

    #[tokio::test]
    async fn write_audio_file_persists_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp3");
        let bytes = vec![0xFFu8, 0xFB, 0x90, 0x00, 0x01, 0x02];

        write_audio_file(&path, &bytes).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[tokio::test]
    async fn write_audio_file_reports_write_errors() {
        let result = write_audio_file(Path::new("/nonexistent-dir/clip.mp3"), &[1, 2, 3]).await;
        assert!(matches!(result, Err(SynthesisError::Write(_))));
    }
}
