/*
 *  Copyright 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use std::collections::VecDeque;

use crate::api::units::DataRate;

/// Short-term forecast of achievable throughput, fed with the realized
/// throughput of every download.
pub trait ThroughputForecasterInterface {
    // The manifest download. Only used until segment samples arrive.
    fn on_manifest_sample(&mut self, sample: DataRate);
    fn on_sample(&mut self, sample: DataRate);
    // None until at least one sample was seen.
    fn forecast(&self) -> Option<DataRate>;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ForecastStrategy {
    /// Weighted mean of the last segment samples, favouring the newest.
    #[default]
    WindowedWeightedMean,
    /// Exponential average; forecasts the lower edge of its deviation band.
    Ewma { alpha: f64 },
}

impl ForecastStrategy {
    const DEFAULT_EWMA_ALPHA: f64 = 0.5;

    pub fn validate(&mut self) {
        if let ForecastStrategy::Ewma { alpha } = self {
            if !(*alpha > 0.0 && *alpha <= 1.0) {
                tracing::warn!("EWMA forecast alpha must be in (0, 1], got {}", alpha);
                *alpha = Self::DEFAULT_EWMA_ALPHA;
            }
        }
    }

    pub fn build(&self) -> Box<dyn ThroughputForecasterInterface> {
        match *self {
            ForecastStrategy::WindowedWeightedMean => {
                Box::new(WindowedThroughputForecaster::default())
            }
            ForecastStrategy::Ewma { alpha } => Box::new(EwmaThroughputForecaster::new(alpha)),
        }
    }
}

// Up to MEAN_WINDOW samples are averaged plainly; past that the two newest
// samples get extra weight. Never more than MAX_WINDOW samples are used.
#[derive(Debug, Default)]
pub struct WindowedThroughputForecaster {
    manifest_sample: Option<DataRate>,
    window: VecDeque<DataRate>,
    samples: usize,
}

impl WindowedThroughputForecaster {
    const MEAN_WINDOW: usize = 4;
    const MAX_WINDOW: usize = 10;
    const NEWEST_WEIGHT: f64 = 3.0;
    const SECOND_NEWEST_WEIGHT: f64 = 2.0;

    fn mean_bps(&self) -> f64 {
        let sum: f64 = self.window.iter().map(|s| s.bps_float()).sum();
        sum / self.window.len() as f64
    }

    fn weighted_mean_bps(&self) -> f64 {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for (age, sample) in self.window.iter().rev().enumerate() {
            let weight = match age {
                0 => Self::NEWEST_WEIGHT,
                1 => Self::SECOND_NEWEST_WEIGHT,
                _ => 1.0,
            };
            weighted_sum += weight * sample.bps_float();
            total_weight += weight;
        }
        weighted_sum / total_weight
    }
}

impl ThroughputForecasterInterface for WindowedThroughputForecaster {
    fn on_manifest_sample(&mut self, sample: DataRate) {
        self.manifest_sample = Some(sample);
    }

    fn on_sample(&mut self, sample: DataRate) {
        self.samples += 1;
        self.window.push_back(sample);
        if self.window.len() > Self::MAX_WINDOW {
            self.window.pop_front();
        }
    }

    fn forecast(&self) -> Option<DataRate> {
        match self.samples {
            0 => self.manifest_sample,
            1 => self.window.back().copied(),
            n if n <= Self::MEAN_WINDOW => Some(DataRate::from_bps_float(self.mean_bps())),
            _ => Some(DataRate::from_bps_float(self.weighted_mean_bps())),
        }
    }
}

#[derive(Debug)]
pub struct EwmaThroughputForecaster {
    alpha: f64,
    estimate_kbps: Option<f64>,
    deviation_kbps: f64,
}

impl EwmaThroughputForecaster {
    // Normalized variance bounds: 0.4 ~= 14 kbit/s and 2.5 ~= 35 kbit/s at
    // 500 kbit/s.
    const MIN_DEVIATION: f64 = 0.4;
    const MAX_DEVIATION: f64 = 2.5;

    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            estimate_kbps: None,
            deviation_kbps: Self::MIN_DEVIATION,
        }
    }

    pub fn estimate(&self) -> Option<DataRate> {
        self.estimate_kbps.map(DataRate::from_kbps_float)
    }

    fn update(&mut self, sample: DataRate, alpha: f64) {
        let sample_kbps: f64 = sample.kbps_float();
        let estimate_kbps = match self.estimate_kbps {
            Some(estimate_kbps) => (1.0 - alpha) * estimate_kbps + alpha * sample_kbps,
            None => sample_kbps,
        };

        // Variance of the estimate, normalized with the estimate itself.
        let norm: f64 = estimate_kbps.max(1.0);
        let error_kbps: f64 = estimate_kbps - sample_kbps;
        self.deviation_kbps =
            (1.0 - alpha) * self.deviation_kbps + alpha * error_kbps * error_kbps / norm;
        self.deviation_kbps = self
            .deviation_kbps
            .clamp(Self::MIN_DEVIATION, Self::MAX_DEVIATION);
        self.estimate_kbps = Some(estimate_kbps);
    }

    fn deviation_estimate_kbps(&self, estimate_kbps: f64) -> f64 {
        (self.deviation_kbps * estimate_kbps).sqrt()
    }
}

impl ThroughputForecasterInterface for EwmaThroughputForecaster {
    fn on_manifest_sample(&mut self, sample: DataRate) {
        self.update(sample, self.alpha);
    }

    fn on_sample(&mut self, sample: DataRate) {
        self.update(sample, self.alpha);
    }

    fn forecast(&self) -> Option<DataRate> {
        let estimate_kbps = self.estimate_kbps?;
        Some(DataRate::from_kbps_float(
            (estimate_kbps - 3.0 * self.deviation_estimate_kbps(estimate_kbps)).max(0.0),
        ))
    }
}
