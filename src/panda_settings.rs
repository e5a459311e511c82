use crate::{
    api::units::{DataRate, TimeDelta},
    throughput_forecaster::ForecastStrategy,
};

/// Tuning constants of a PANDA session.
///
/// `probing_increment` and `up_margin` are starting values only; both are
/// re-derived from the manifest download when the session is initialized.
#[derive(Debug, Clone, PartialEq)]
pub struct PandaSettings {
    // Additive increase applied per probe (w).
    pub probing_increment: DataRate,
    // How fast the probe converges, in 1/s (k).
    pub probe_convergence_rate: f64,
    // How strongly the buffer error shifts the request pacing (beta).
    pub buffer_convergence_rate: f64,
    // EWMA rate of the smoother, in 1/s (alpha).
    pub smoothing_rate: f64,
    // Multiplicative margin below the smoothed estimate for switching up
    // (epsilon).
    pub up_margin: f64,
    // Same for switching down. Zero keeps the dead zone one-sided.
    pub down_margin: f64,
    // Buffer level the pacer steers towards (bmin).
    pub min_buffer_target: TimeDelta,
    pub forecast_strategy: ForecastStrategy,
}

impl Default for PandaSettings {
    fn default() -> Self {
        Self {
            probing_increment: DataRate::from_kbps(300),
            probe_convergence_rate: 0.14,
            buffer_convergence_rate: 0.2,
            smoothing_rate: 0.2,
            up_margin: 0.15,
            down_margin: 0.0,
            min_buffer_target: TimeDelta::from_seconds(26),
            forecast_strategy: ForecastStrategy::default(),
        }
    }
}

impl PandaSettings {
    const MAX_RATE: f64 = 10.0;

    /// Resets every out of range field to its default.
    pub fn validate(&mut self) {
        let defaults = Self::default();

        if self.probing_increment <= DataRate::zero() || self.probing_increment.is_infinite() {
            tracing::warn!("Probing increment must be a positive finite bitrate");
            self.probing_increment = defaults.probing_increment;
        }
        if !Self::is_valid_rate(self.probe_convergence_rate) {
            tracing::warn!(
                "Probe convergence rate must be in (0, {}], got {}",
                Self::MAX_RATE,
                self.probe_convergence_rate
            );
            self.probe_convergence_rate = defaults.probe_convergence_rate;
        }
        if !Self::is_valid_rate(self.buffer_convergence_rate) {
            tracing::warn!(
                "Buffer convergence rate must be in (0, {}], got {}",
                Self::MAX_RATE,
                self.buffer_convergence_rate
            );
            self.buffer_convergence_rate = defaults.buffer_convergence_rate;
        }
        if !Self::is_valid_rate(self.smoothing_rate) {
            tracing::warn!(
                "Smoothing rate must be in (0, {}], got {}",
                Self::MAX_RATE,
                self.smoothing_rate
            );
            self.smoothing_rate = defaults.smoothing_rate;
        }
        if !(0.0..1.0).contains(&self.up_margin) {
            tracing::warn!("Up margin must be in [0, 1), got {}", self.up_margin);
            self.up_margin = defaults.up_margin;
        }
        if !(0.0..1.0).contains(&self.down_margin) {
            tracing::warn!("Down margin must be in [0, 1), got {}", self.down_margin);
            self.down_margin = defaults.down_margin;
        }
        if self.min_buffer_target < TimeDelta::zero() || self.min_buffer_target.is_infinite() {
            tracing::warn!("Minimum buffer target must be a finite, non-negative duration");
            self.min_buffer_target = defaults.min_buffer_target;
        }
        self.forecast_strategy.validate();
    }

    fn is_valid_rate(rate: f64) -> bool {
        rate > 0.0 && rate <= Self::MAX_RATE
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let mut settings = PandaSettings::default();
        settings.validate();
        assert_eq!(settings, PandaSettings::default());
    }

    #[test]
    fn out_of_range_values_are_reset() {
        let mut settings = PandaSettings {
            probing_increment: DataRate::zero(),
            probe_convergence_rate: -1.0,
            buffer_convergence_rate: f64::NAN,
            smoothing_rate: 11.0,
            up_margin: 1.0,
            down_margin: -0.1,
            min_buffer_target: TimeDelta::from_seconds(-1),
            forecast_strategy: ForecastStrategy::default(),
        };
        settings.validate();
        assert_eq!(settings, PandaSettings::default());
    }

    #[test]
    fn in_range_values_are_kept() {
        let mut settings = PandaSettings {
            smoothing_rate: 0.5,
            up_margin: 0.0,
            min_buffer_target: TimeDelta::zero(),
            ..Default::default()
        };
        settings.validate();
        assert_eq!(settings.smoothing_rate, 0.5);
        assert_eq!(settings.up_margin, 0.0);
        assert_eq!(settings.min_buffer_target, TimeDelta::zero());
    }
}
