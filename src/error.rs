use thiserror::Error;

use crate::api::units::{DataRate, TimeDelta};

/// Errors surfaced by the adaptation loop.
///
/// A failure aborts the step that produced it; the estimate series are left as
/// they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PandaError {
    #[error("quality level set is empty")]
    EmptyQualityLevels,

    #[error("quality levels must be strictly ascending: {previous} followed by {next}")]
    UnsortedQualityLevels { previous: DataRate, next: DataRate },

    #[error("quality level {0} is not a positive finite bitrate")]
    NonPositiveQualityLevel(DataRate),

    #[error("segment duration must be positive, got {0:?}")]
    NonPositiveSegmentDuration(TimeDelta),

    #[error("download duration must be positive, got {duration:?}")]
    NonPositiveDownloadDuration { duration: TimeDelta },

    #[error("response received without an outstanding request")]
    NoOutstandingRequest,

    #[error("session has not been initialized from a manifest response")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, PandaError>;
