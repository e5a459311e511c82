use crate::api::units::{DataRate, TimeDelta};

/// Exponential smoothing of the raw share estimate.
#[derive(Debug, Clone)]
pub struct Smoother {
    smoothing_rate: f64,
}

impl Smoother {
    pub fn new(smoothing_rate: f64) -> Self {
        Self { smoothing_rate }
    }

    /// y = y_last - tr * alpha * (y_last - x), floored at `floor`.
    pub fn smooth(
        &self,
        last_smoothed: DataRate,
        raw_estimate: DataRate,
        inter_request_delay: TimeDelta,
        floor: DataRate,
    ) -> DataRate {
        let weight = inter_request_delay.seconds_float() * self.smoothing_rate;
        let last = last_smoothed.bps_float();
        let smoothed = last - weight * (last - raw_estimate.bps_float());
        DataRate::from_bps_float(smoothed.max(floor.bps_float()))
    }
}
