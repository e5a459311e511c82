use crate::{
    api::units::{DataRate, DataSize, TimeDelta, Timestamp},
    error::{PandaError, Result},
    series::Series,
};

/// Records when requests leave and responses arrive, and turns that into
/// download durations and realized throughput.
#[derive(Debug, Default)]
pub struct TimingTracker {
    segment_index: Option<u64>,
    request_time: Option<Timestamp>,
    response_time: Option<Timestamp>,

    buffer_levels: Series<TimeDelta>,
    download_durations: Series<TimeDelta>,
    throughputs: Series<DataRate>,
}

impl TimingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every request, the manifest one included. Returns the index of
    /// the request that just started.
    pub fn begin_request(&mut self, now: Timestamp, buffer_level: TimeDelta) -> u64 {
        let index = self.segment_index.map_or(0, |index| index + 1);
        self.segment_index = Some(index);
        self.request_time = Some(now);
        self.buffer_levels.push(buffer_level);
        index
    }

    /// Completes the manifest request. The throughput is measured on the
    /// actual payload since no quality level applies yet.
    pub fn end_manifest_response(&mut self, now: Timestamp, payload: DataSize) -> Result<DataRate> {
        let duration = self.download_duration(now)?;
        let throughput = DataRate::from_bps_float(payload.bits_float() / duration.seconds_float());
        self.record(now, duration, throughput);
        Ok(throughput)
    }

    /// Completes a segment request fetched at `chosen_rate`.
    pub fn end_response(
        &mut self,
        now: Timestamp,
        chosen_rate: DataRate,
        segment_duration: TimeDelta,
    ) -> Result<DataRate> {
        let duration = self.download_duration(now)?;
        let throughput = DataRate::from_bps_float(
            chosen_rate.bps_float() * segment_duration.seconds_float() / duration.seconds_float(),
        );
        self.record(now, duration, throughput);
        Ok(throughput)
    }

    /// Appends a buffer level that was not reported with a request.
    pub fn push_buffer_level(&mut self, buffer_level: TimeDelta) {
        self.buffer_levels.push(buffer_level);
    }

    pub fn segment_index(&self) -> Option<u64> {
        self.segment_index
    }

    pub fn last_request_time(&self) -> Option<Timestamp> {
        self.request_time
    }

    pub fn last_response_time(&self) -> Option<Timestamp> {
        self.response_time
    }

    pub fn last_buffer_level(&self) -> Option<TimeDelta> {
        self.buffer_levels.last_copied()
    }

    pub fn last_download_duration(&self) -> Option<TimeDelta> {
        self.download_durations.last_copied()
    }

    pub fn last_throughput(&self) -> Option<DataRate> {
        self.throughputs.last_copied()
    }

    pub fn buffer_levels(&self) -> &Series<TimeDelta> {
        &self.buffer_levels
    }

    pub fn download_durations(&self) -> &Series<TimeDelta> {
        &self.download_durations
    }

    pub fn throughputs(&self) -> &Series<DataRate> {
        &self.throughputs
    }

    pub(crate) fn drain(&mut self) -> (Vec<TimeDelta>, Vec<TimeDelta>, Vec<DataRate>) {
        (
            self.buffer_levels.drain(),
            self.download_durations.drain(),
            self.throughputs.drain(),
        )
    }

    // Consumes the outstanding request. A second response for the same
    // request finds nothing outstanding.
    fn download_duration(&mut self, now: Timestamp) -> Result<TimeDelta> {
        let request_time = self
            .request_time
            .take()
            .ok_or(PandaError::NoOutstandingRequest)?;
        let duration = now - request_time;
        if duration <= TimeDelta::zero() {
            return Err(PandaError::NonPositiveDownloadDuration { duration });
        }
        Ok(duration)
    }

    fn record(&mut self, now: Timestamp, duration: TimeDelta, throughput: DataRate) {
        self.response_time = Some(now);
        self.download_durations.push(duration);
        self.throughputs.push(throughput);
    }
}
