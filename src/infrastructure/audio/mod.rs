pub mod capture;
pub mod playback;

pub use capture::{CaptureBackend, CaptureService};
pub use playback::{AudioDetails, AudioPlayer, PlaybackService};
