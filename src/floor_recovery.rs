use crate::{
    api::units::{DataRate, TimeDelta},
    quality_level_set::QualityLevelSet,
};

/// Catches a fall from a higher level straight to the minimum one and, when
/// the buffer can absorb it, picks the highest level the forecast throughput
/// can sustain for as long as the buffer lasts. Never above the previous
/// level.
///
/// Returns `None` when the rule does not apply or no level qualifies; the
/// quantized rate then stands.
pub fn recover(
    levels: &QualityLevelSet,
    previous: DataRate,
    quantized: DataRate,
    buffer_level: TimeDelta,
    forecast: Option<DataRate>,
) -> Option<DataRate> {
    if previous <= levels.min() || quantized != levels.min() || buffer_level <= TimeDelta::zero() {
        return None;
    }
    let forecast = forecast?;
    let affordable_bps = buffer_level.seconds_float() * forecast.bps_float();
    levels.floor_capped(affordable_bps, previous)
}
