/// A generic bitrate adaptation interface: [AdaptationControllerInterface](adaptation_control::AdaptationControllerInterface).
pub mod adaptation_control;

/// Events delivered by the streaming pipeline.
pub mod streaming_types;

/// Some unit types, such as [DataSize](units::DataSize) and [DataRate](units::DataRate).
pub mod units;
