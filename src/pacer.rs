use crate::{
    api::units::{DataRate, TimeDelta},
    clock::Clock,
};

/// Decides how long to wait between two segment requests, and waits.
///
/// The target delay makes the request rate follow the ratio of the chosen rate
/// to the smoothed share estimate, corrected by how far the buffer is from its
/// target: a fuller buffer stretches the delay, a draining one shortens it.
#[derive(Debug, Clone)]
pub struct Pacer {
    segment_duration: TimeDelta,
    buffer_convergence_rate: f64,
    min_buffer_target: TimeDelta,
}

impl Pacer {
    pub fn new(
        segment_duration: TimeDelta,
        buffer_convergence_rate: f64,
        min_buffer_target: TimeDelta,
    ) -> Self {
        Self {
            segment_duration,
            buffer_convergence_rate,
            min_buffer_target,
        }
    }

    /// tnd = r * t / y + beta * (b - bmin). May be negative.
    pub fn target_delay(
        &self,
        chosen_rate: DataRate,
        smoothed_estimate: DataRate,
        buffer_level: TimeDelta,
    ) -> TimeDelta {
        let fetch_seconds =
            chosen_rate.bps_float() * self.segment_duration.seconds_float()
                / smoothed_estimate.bps_float();
        let buffer_error = buffer_level - self.min_buffer_target;
        TimeDelta::from_seconds_float(
            fetch_seconds + self.buffer_convergence_rate * buffer_error.seconds_float(),
        )
    }

    /// Waits out whatever is left of `target_delay` once the download itself
    /// took `download_duration`. Returns the time slept.
    pub fn enforce(
        clock: &mut dyn Clock,
        target_delay: TimeDelta,
        download_duration: TimeDelta,
    ) -> TimeDelta {
        let remaining = target_delay - download_duration;
        if remaining <= TimeDelta::zero() {
            return TimeDelta::zero();
        }
        tracing::trace!(?remaining, ?target_delay, "pacing next request");
        clock.sleep(remaining);
        remaining
    }

    pub fn segment_duration(&self) -> TimeDelta {
        self.segment_duration
    }
}
