use crate::{
    api::{
        adaptation_control::AdaptationControllerInterface,
        streaming_types::{ManifestRequest, ManifestResponse, SegmentRequest},
        units::{DataRate, TimeDelta},
    },
    clock::{Clock, SystemClock},
    error::{PandaError, Result},
    floor_recovery,
    pacer::Pacer,
    panda_settings::PandaSettings,
    quality_level_set::QualityLevelSet,
    quantizer::Quantizer,
    series::Series,
    share_estimator::{ProbeInput, ShareEstimator},
    smoother::Smoother,
    throughput_forecaster::ThroughputForecasterInterface,
    timing_tracker::TimingTracker,
};

/// Everything collected during a session, oldest value first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTrace {
    pub buffer_levels: Vec<TimeDelta>,
    pub download_durations: Vec<TimeDelta>,
    pub throughputs: Vec<DataRate>,
    pub forecasts: Vec<DataRate>,
    pub raw_estimates: Vec<DataRate>,
    pub smoothed_estimates: Vec<DataRate>,
    pub chosen_rates: Vec<DataRate>,
    pub target_delays: Vec<TimeDelta>,
    pub inter_request_delays: Vec<TimeDelta>,
}

// Fixed once the manifest has been received.
struct Session {
    levels: QualityLevelSet,
    share_estimator: ShareEstimator,
    smoother: Smoother,
    quantizer: Quantizer,
    pacer: Pacer,
}

/// PANDA rate adaptation for one streaming session.
///
/// The manifest download seeds every estimator. From then on each segment
/// request runs the probe (waiting out the pacing delay of the previous
/// segment first), smooths and quantizes the estimate, guards against a
/// needless fall to the lowest level and schedules the next request.
pub struct QualitySelector<C: Clock = SystemClock> {
    settings: PandaSettings,
    clock: C,
    timing: TimingTracker,
    forecaster: Box<dyn ThroughputForecasterInterface>,
    session: Option<Session>,

    // x
    raw_estimates: Series<DataRate>,
    // y
    smoothed_estimates: Series<DataRate>,
    // r
    chosen_rates: Series<DataRate>,
    // tnd
    target_delays: Series<TimeDelta>,
    // tr
    inter_request_delays: Series<TimeDelta>,
    forecasts: Series<DataRate>,
}

impl Default for QualitySelector<SystemClock> {
    fn default() -> Self {
        Self::new(PandaSettings::default(), SystemClock::new())
    }
}

impl<C: Clock> QualitySelector<C> {
    pub fn new(mut settings: PandaSettings, clock: C) -> Self {
        settings.validate();
        let forecaster = settings.forecast_strategy.build();
        Self {
            settings,
            clock,
            timing: TimingTracker::new(),
            forecaster,
            session: None,
            raw_estimates: Series::new(),
            smoothed_estimates: Series::new(),
            chosen_rates: Series::new(),
            target_delays: Series::new(),
            inter_request_delays: Series::new(),
            forecasts: Series::new(),
        }
    }

    pub fn settings(&self) -> &PandaSettings {
        &self.settings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn quality_levels(&self) -> Option<&QualityLevelSet> {
        self.session.as_ref().map(|session| &session.levels)
    }

    /// Probing increment in use. Re-derived from the manifest download.
    pub fn probing_increment(&self) -> DataRate {
        self.session.as_ref().map_or(self.settings.probing_increment, |session| {
            session.share_estimator.probing_increment()
        })
    }

    /// Up margin in use. Re-derived from the manifest download.
    pub fn up_margin(&self) -> f64 {
        self.session
            .as_ref()
            .map_or(self.settings.up_margin, |session| session.quantizer.up_margin())
    }

    pub fn segment_index(&self) -> Option<u64> {
        self.timing.segment_index()
    }

    pub fn last_chosen_rate(&self) -> Option<DataRate> {
        self.chosen_rates.last_copied()
    }

    pub fn timing(&self) -> &TimingTracker {
        &self.timing
    }

    pub fn raw_estimates(&self) -> &Series<DataRate> {
        &self.raw_estimates
    }

    pub fn smoothed_estimates(&self) -> &Series<DataRate> {
        &self.smoothed_estimates
    }

    pub fn chosen_rates(&self) -> &Series<DataRate> {
        &self.chosen_rates
    }

    pub fn target_delays(&self) -> &Series<TimeDelta> {
        &self.target_delays
    }

    pub fn inter_request_delays(&self) -> &Series<TimeDelta> {
        &self.inter_request_delays
    }

    pub fn forecasts(&self) -> &Series<DataRate> {
        &self.forecasts
    }

    /// Moves every collected series out. Meant for the end of a session: the
    /// selector has no history left to adapt from afterwards.
    pub fn drain_trace(&mut self) -> SessionTrace {
        let (buffer_levels, download_durations, throughputs) = self.timing.drain();
        SessionTrace {
            buffer_levels,
            download_durations,
            throughputs,
            forecasts: self.forecasts.drain(),
            raw_estimates: self.raw_estimates.drain(),
            smoothed_estimates: self.smoothed_estimates.drain(),
            chosen_rates: self.chosen_rates.drain(),
            target_delays: self.target_delays.drain(),
            inter_request_delays: self.inter_request_delays.drain(),
        }
    }

    fn push_forecast(&mut self) {
        if let Some(forecast) = self.forecaster.forecast() {
            self.forecasts.push(forecast);
        }
    }

    fn initialize(&mut self, levels: QualityLevelSet, segment_duration: TimeDelta, throughput: DataRate) {
        let floor_index = levels.floor_index(throughput.bps_float()).unwrap_or(0);
        // One level above the measured throughput, or the top level when there
        // is none above it.
        let start_index = (floor_index + 1).min(levels.len() - 1);
        let start_rate = levels.get_clamped(start_index);
        let probing_increment = levels.get_clamped(floor_index / 2);

        let mut up_margin = self.settings.up_margin;
        if let Some(below) = start_index.checked_sub(1).and_then(|index| levels.get(index)) {
            up_margin = up_margin.min((start_rate - below) / start_rate);
        }

        tracing::info!(
            "PANDA session initialized [throughput: {:?}] [start rate: {:?}] [probing increment: {:?}] [up margin: {}] [levels: {}]",
            throughput,
            start_rate,
            probing_increment,
            up_margin,
            levels.len()
        );

        let pacer = Pacer::new(
            segment_duration,
            self.settings.buffer_convergence_rate,
            self.settings.min_buffer_target,
        );
        // Steady state: chosen rate equals the smoothed estimate and the buffer
        // sits at its target, so the first request waits one segment duration.
        let buffer_level = self.settings.min_buffer_target;
        self.timing.push_buffer_level(buffer_level);
        self.raw_estimates.push(start_rate);
        self.smoothed_estimates.push(start_rate);
        self.chosen_rates.push(start_rate);
        self.target_delays
            .push(pacer.target_delay(start_rate, start_rate, buffer_level));

        self.forecaster.on_manifest_sample(throughput);
        self.push_forecast();

        self.session = Some(Session {
            share_estimator: ShareEstimator::new(
                self.settings.probe_convergence_rate,
                probing_increment,
                levels.min(),
            ),
            smoother: Smoother::new(self.settings.smoothing_rate),
            quantizer: Quantizer::new(up_margin, self.settings.down_margin),
            pacer,
            levels,
        });
    }

    fn last_probe_input(&self) -> Result<ProbeInput> {
        Ok(ProbeInput {
            last_estimate: self
                .raw_estimates
                .last_copied()
                .ok_or(PandaError::NotInitialized)?,
            last_throughput: self
                .timing
                .last_throughput()
                .ok_or(PandaError::NotInitialized)?,
            last_target_delay: self
                .target_delays
                .last_copied()
                .ok_or(PandaError::NotInitialized)?,
            last_download_duration: self
                .timing
                .last_download_duration()
                .ok_or(PandaError::NotInitialized)?,
        })
    }
}

impl<C: Clock> AdaptationControllerInterface for QualitySelector<C> {
    fn on_manifest_request(&mut self, event: ManifestRequest) {
        let now = self.clock.now();
        self.timing.begin_request(now, event.buffer_level);
    }

    fn on_manifest_response(&mut self, event: ManifestResponse) -> Result<()> {
        if self.session.is_some() {
            tracing::warn!("Manifest received again after initialization, ignored.");
            return Ok(());
        }
        if event.segment_duration <= TimeDelta::zero() {
            return Err(PandaError::NonPositiveSegmentDuration(event.segment_duration));
        }
        let levels = QualityLevelSet::new(event.quality_levels)?;

        let now = self.clock.now();
        let throughput = self
            .timing
            .end_manifest_response(now, event.payload_size)
            .inspect_err(|err| tracing::warn!("Manifest response rejected: {}", err))?;

        self.initialize(levels, event.segment_duration, throughput);
        Ok(())
    }

    fn on_segment_request(&mut self, event: SegmentRequest) -> Result<DataRate> {
        let input = self.last_probe_input()?;
        let session = self.session.as_ref().ok_or(PandaError::NotInitialized)?;
        let last_smoothed = self
            .smoothed_estimates
            .last_copied()
            .ok_or(PandaError::NotInitialized)?;
        let previous = self
            .chosen_rates
            .last_copied()
            .ok_or(PandaError::NotInitialized)?;
        let floor = session.levels.min();

        let probe = session.share_estimator.update(&mut self.clock, input);
        let mut smoothed =
            session
                .smoother
                .smooth(last_smoothed, probe.estimate, probe.inter_request_delay, floor);
        let mut chosen = session.quantizer.quantize(&session.levels, smoothed, previous);

        self.inter_request_delays.push(probe.inter_request_delay);
        self.raw_estimates.push(probe.estimate);
        self.smoothed_estimates.push(smoothed);
        self.chosen_rates.push(chosen);

        if let Some(recovered) = floor_recovery::recover(
            &session.levels,
            previous,
            chosen,
            event.buffer_level,
            self.forecasts.last_copied(),
        ) {
            tracing::info!(
                "Avoided fall to minimum level [previous: {:?}] [recovered: {:?}] [buffer: {:?}]",
                previous,
                recovered,
                event.buffer_level
            );
            self.raw_estimates.replace_last(recovered);
            self.smoothed_estimates.replace_last(recovered);
            self.chosen_rates.replace_last(recovered);
            smoothed = recovered;
            chosen = recovered;
        }

        let target_delay = session
            .pacer
            .target_delay(chosen, smoothed, event.buffer_level);
        self.target_delays.push(target_delay);

        let now = self.clock.now();
        let index = self.timing.begin_request(now, event.buffer_level);

        tracing::debug!(
            "Segment {} [raw: {:?}] [smoothed: {:?}] [chosen: {:?}] [waited: {:?}] [next target delay: {:?}]",
            index,
            probe.estimate,
            smoothed,
            chosen,
            probe.waited,
            target_delay
        );
        Ok(chosen)
    }

    fn on_segment_response(&mut self) -> Result<()> {
        let session = self.session.as_ref().ok_or(PandaError::NotInitialized)?;
        let chosen = self
            .chosen_rates
            .last_copied()
            .ok_or(PandaError::NotInitialized)?;
        let segment_duration = session.pacer.segment_duration();

        let now = self.clock.now();
        let throughput = self
            .timing
            .end_response(now, chosen, segment_duration)
            .inspect_err(|err| tracing::warn!("Segment response rejected: {}", err))?;

        self.forecaster.on_sample(throughput);
        self.push_forecast();
        Ok(())
    }
}
