use crate::{api::units::DataRate, quality_level_set::QualityLevelSet};

/// Maps the smoothed estimate onto a quality level.
///
/// Two thresholds are derived from the smoothed estimate: switching up needs
/// the estimate to clear the up margin, switching down happens only once the
/// estimate falls below the down margin. In between, the previous level is
/// held.
#[derive(Debug, Clone)]
pub struct Quantizer {
    up_margin: f64,
    down_margin: f64,
}

impl Quantizer {
    pub fn new(up_margin: f64, down_margin: f64) -> Self {
        Self {
            up_margin,
            down_margin,
        }
    }

    pub fn up_margin(&self) -> f64 {
        self.up_margin
    }

    pub fn down_margin(&self) -> f64 {
        self.down_margin
    }

    pub fn quantize(
        &self,
        levels: &QualityLevelSet,
        smoothed: DataRate,
        previous: DataRate,
    ) -> DataRate {
        let y = smoothed.bps_float();
        let up = levels.floor(y - self.up_margin * y);
        let down = levels.floor(y - self.down_margin * y);

        if previous < up {
            up
        } else if previous <= down {
            previous
        } else {
            down
        }
    }
}
