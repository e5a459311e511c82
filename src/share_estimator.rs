use crate::{
    api::units::{DataRate, TimeDelta},
    clock::Clock,
    pacer::Pacer,
};

/// What the probe needs to know about the previous segment.
#[derive(Debug, Clone, Copy)]
pub struct ProbeInput {
    pub last_estimate: DataRate,
    pub last_throughput: DataRate,
    pub last_target_delay: TimeDelta,
    pub last_download_duration: TimeDelta,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeUpdate {
    // Time the update is integrated over (tr).
    pub inter_request_delay: TimeDelta,
    pub estimate: DataRate,
    // How long the pacing wait blocked.
    pub waited: TimeDelta,
}

// Probe-based additive increase: the share estimate climbs by the probing
// increment while measured throughput keeps up with it and backs off in
// proportion to the shortfall otherwise.
#[derive(Debug, Clone)]
pub struct ShareEstimator {
    probe_convergence_rate: f64,
    probing_increment: DataRate,
    floor: DataRate,
}

impl ShareEstimator {
    pub fn new(probe_convergence_rate: f64, probing_increment: DataRate, floor: DataRate) -> Self {
        Self {
            probe_convergence_rate,
            probing_increment,
            floor,
        }
    }

    pub fn probing_increment(&self) -> DataRate {
        self.probing_increment
    }

    /// Waits for the pacing target of the previous segment, then computes the
    /// next raw estimate.
    pub fn update(&self, clock: &mut dyn Clock, input: ProbeInput) -> ProbeUpdate {
        let inter_request_delay = input.last_target_delay.max(input.last_download_duration);
        let waited = Pacer::enforce(clock, input.last_target_delay, input.last_download_duration);

        let estimate = self.next_estimate(
            input.last_estimate,
            input.last_throughput,
            inter_request_delay,
        );
        ProbeUpdate {
            inter_request_delay,
            estimate,
            waited,
        }
    }

    fn next_estimate(
        &self,
        last_estimate: DataRate,
        last_throughput: DataRate,
        inter_request_delay: TimeDelta,
    ) -> DataRate {
        let w = self.probing_increment.bps_float();
        let x = last_estimate.bps_float();
        let overshoot = (x - last_throughput.bps_float() + w).max(0.0);
        let next = x + self.probe_convergence_rate * inter_request_delay.seconds_float() * (w - overshoot);
        DataRate::from_bps_float(next.max(self.floor.bps_float()))
    }
}
