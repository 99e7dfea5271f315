use std::path::PathBuf;

use tokio::process::Command;

use crate::error::{AppError, AppResult};

/// External recorder invocations per platform audio system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureBackend {
    /// `sox` reading from ALSA, writing FLAC
    SoxLinux,
    /// `sox` reading from waveaudio, writing WAV
    SoxWindows,
}

impl CaptureBackend {
    fn extension(&self) -> &'static str {
        match self {
            CaptureBackend::SoxLinux => "flac",
            CaptureBackend::SoxWindows => "wav",
        }
    }

    fn input_args(&self) -> [&'static str; 3] {
        match self {
            CaptureBackend::SoxLinux => ["-t", "alsa", "default"],
            CaptureBackend::SoxWindows => ["-t", "waveaudio", "default"],
        }
    }

    /// Trailing silence threshold differs per platform in the reference setup
    fn silence_args(&self) -> [&'static str; 7] {
        match self {
            CaptureBackend::SoxLinux => ["silence", "1", "0.1", "5%", "1", "3.0", "5%"],
            CaptureBackend::SoxWindows => ["silence", "1", "0.1", "5%", "1", "1.0", "5%"],
        }
    }
}

/// Records microphone audio through an external `sox` process until silence
/// is detected.
pub struct CaptureService;

impl CaptureService {
    pub fn new() -> Self {
        Self
    }

    /// Record until silence; resolves to the written audio filename.
    ///
    /// The recorder captures 16 kHz signed 16-bit audio into
    /// `<output_base>.<ext>`; a non-zero recorder exit fails the capture.
    pub async fn record_until_silence(
        &self,
        backend: CaptureBackend,
        output_base: &str,
    ) -> AppResult<PathBuf> {
        let filename = PathBuf::from(format!("{output_base}.{}", backend.extension()));

        tracing::info!(
            backend = ?backend,
            filename = %filename.display(),
            "Recording until silence"
        );

        let output = Command::new("sox")
            .args(backend.input_args())
            .args(["--encoding", "signed-integer", "--bits", "16", "--rate", "16000"])
            .arg(&filename)
            .args(backend.silence_args())
            .output()
            .await?;

        // sox reports device/format info on stderr even on success
        if !output.stderr.is_empty() {
            for line in String::from_utf8_lossy(&output.stderr).lines().take(8) {
                tracing::debug!(sox = line, "Recorder output");
            }
        }

        if !output.status.success() {
            return Err(AppError::ExternalService(format!(
                "recorder exited with code {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        tracing::info!(filename = %filename.display(), "Recording finished");
        Ok(filename)
    }
}

impl Default for CaptureService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_extensions() {
        assert_eq!(CaptureBackend::SoxLinux.extension(), "flac");
        assert_eq!(CaptureBackend::SoxWindows.extension(), "wav");
    }

    #[test]
    fn linux_backend_reads_from_alsa() {
        assert_eq!(CaptureBackend::SoxLinux.input_args(), ["-t", "alsa", "default"]);
        assert_eq!(
            CaptureBackend::SoxWindows.input_args(),
            ["-t", "waveaudio", "default"]
        );
    }
}
