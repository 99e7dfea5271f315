use std::path::Path;
use std::process::ExitStatus;

use serde::Deserialize;
use tokio::process::Command;

use crate::error::{AppError, AppResult};

/// External player processes we know how to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioPlayer {
    Ffplay,
}

/// Metadata probed from an audio file before playback
#[derive(Debug, Clone, PartialEq)]
pub struct AudioDetails {
    pub codec: String,
    pub sample_rate: u32,
    pub channels: u32,
    pub duration_secs: f64,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[serde(default)]
    codec_name: Option<String>,
    #[serde(default)]
    sample_rate: Option<String>,
    #[serde(default)]
    channels: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    #[serde(default)]
    duration: Option<String>,
}

/// Plays audio files through an external player process
pub struct PlaybackService {
    log_metadata: bool,
}

impl PlaybackService {
    pub fn new(log_metadata: bool) -> Self {
        Self { log_metadata }
    }

    /// Play `filename` and wait for the player to exit.
    pub async fn play(&self, player: AudioPlayer, filename: &Path) -> AppResult<ExitStatus> {
        if self.log_metadata {
            match self.probe(filename).await {
                Ok(details) => {
                    tracing::debug!(
                        filename = %filename.display(),
                        codec = %details.codec,
                        sample_rate_hz = details.sample_rate,
                        channels = details.channels,
                        duration = %format_duration(details.duration_secs),
                        "Audio metadata"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        filename = %filename.display(),
                        error = %e,
                        "Could not probe audio metadata"
                    );
                }
            }
        }

        let status = match player {
            AudioPlayer::Ffplay => {
                Command::new("ffplay")
                    .args(["-autoexit", "-nodisp"])
                    .arg(filename)
                    .status()
                    .await?
            }
        };

        tracing::debug!(
            filename = %filename.display(),
            exit_code = status.code().unwrap_or(-1),
            "Player closed"
        );
        Ok(status)
    }

    /// Probe format metadata with ffprobe.
    pub async fn probe(&self, filename: &Path) -> AppResult<AudioDetails> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(filename)
            .output()
            .await?;

        if !output.status.success() {
            return Err(AppError::ExternalService(format!(
                "ffprobe exited with code {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let parsed: FfprobeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| AppError::ExternalService(format!("unparsable ffprobe output: {e}")))?;

        extract_details(parsed)
    }
}

fn extract_details(output: FfprobeOutput) -> AppResult<AudioDetails> {
    let stream = output
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| AppError::ExternalService("no audio stream in probe output".to_string()))?;

    let duration_secs = output
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(AudioDetails {
        codec: stream.codec_name.unwrap_or_else(|| "unknown".to_string()),
        sample_rate: stream
            .sample_rate
            .and_then(|r| r.parse().ok())
            .unwrap_or(0),
        channels: stream.channels.unwrap_or(0),
        duration_secs,
    })
}

/// Format a duration in seconds as `H Hours, M Minutes, S Seconds`,
/// omitting zero components.
pub fn format_duration(duration_secs: f64) -> String {
    if !duration_secs.is_finite() || duration_secs < 0.0 {
        return "N/A".to_string();
    }

    let total = duration_secs as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours} Hour{}", if hours > 1 { "s" } else { "" }));
    }
    if minutes > 0 {
        parts.push(format!(
            "{minutes} Minute{}",
            if minutes > 1 { "s" } else { "" }
        ));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!(
            "{seconds} Second{}",
            if seconds > 1 { "s" } else { "" }
        ));
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(0.0), "0 Seconds");
        assert_eq!(format_duration(1.2), "1 Second");
        assert_eq!(format_duration(61.0), "1 Minute, 1 Second");
        assert_eq!(format_duration(3600.0), "1 Hour");
        assert_eq!(format_duration(7325.0), "2 Hours, 2 Minutes, 5 Seconds");
        assert_eq!(format_duration(f64::NAN), "N/A");
        assert_eq!(format_duration(-3.0), "N/A");
    }

    #[test]
    fn ffprobe_output_parses_into_details() {
        let raw = r#"{
            "streams": [
                {"codec_name": "mp3", "sample_rate": "44100", "channels": 2}
            ],
            "format": {"duration": "12.480000"}
        }"#;
        let parsed: FfprobeOutput = serde_json::from_str(raw).unwrap();
        let details = extract_details(parsed).unwrap();

        assert_eq!(details.codec, "mp3");
        assert_eq!(details.sample_rate, 44100);
        assert_eq!(details.channels, 2);
        assert!((details.duration_secs - 12.48).abs() < 1e-9);
    }

    #[test]
    fn probe_output_without_streams_is_an_error() {
        let parsed: FfprobeOutput = serde_json::from_str(r#"{"streams": []}"#).unwrap();
        assert!(extract_details(parsed).is_err());
    }
}
