use crate::api::units::{DataRate, DataSize, TimeDelta};

/// Sent right before the manifest is requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestRequest {
    /// Playback buffer level reported by the buffer tracker.
    pub buffer_level: TimeDelta,
}

/// The parsed manifest together with what it cost to download it.
#[derive(Debug, Clone)]
pub struct ManifestResponse {
    // Available encoding rates, strictly ascending.
    pub quality_levels: Vec<DataRate>,
    // Nominal duration of every media segment.
    pub segment_duration: TimeDelta,
    // Size of the manifest payload. Its download seeds the throughput estimate.
    pub payload_size: DataSize,
}

/// Sent right before a media segment is requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentRequest {
    pub buffer_level: TimeDelta,
}
