use crate::{
    api::units::DataRate,
    error::{PandaError, Result},
};

/// The encoding rates a stream is available in, strictly ascending and never
/// empty. Fixed for the lifetime of a session.
///
/// Every threshold lookup resolves to a member of the set; lookups that no
/// member satisfies fall back to the minimum level unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityLevelSet {
    levels: Vec<DataRate>,
}

impl QualityLevelSet {
    pub fn new(levels: Vec<DataRate>) -> Result<Self> {
        if levels.is_empty() {
            return Err(PandaError::EmptyQualityLevels);
        }
        for level in &levels {
            if level.is_zero() || level.is_infinite() {
                return Err(PandaError::NonPositiveQualityLevel(*level));
            }
        }
        for pair in levels.windows(2) {
            if pair[0] >= pair[1] {
                return Err(PandaError::UnsortedQualityLevels {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self { levels })
    }

    pub fn min(&self) -> DataRate {
        self.levels[0]
    }

    pub fn max(&self) -> DataRate {
        self.levels[self.levels.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    // Never true, a set is validated to hold at least one level.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<DataRate> {
        self.levels.get(index).copied()
    }

    /// Same as `get` but clamps out of range indices to the top level.
    pub fn get_clamped(&self, index: usize) -> DataRate {
        self.levels[index.min(self.levels.len() - 1)]
    }

    pub fn index_of(&self, rate: DataRate) -> Option<usize> {
        self.levels.binary_search(&rate).ok()
    }

    pub fn contains(&self, rate: DataRate) -> bool {
        self.index_of(rate).is_some()
    }

    /// Index of the greatest level not exceeding `threshold_bps`.
    pub fn floor_index(&self, threshold_bps: f64) -> Option<usize> {
        self.levels
            .iter()
            .rposition(|level| level.bps_float() <= threshold_bps)
    }

    /// Greatest level not exceeding `threshold_bps`, or the minimum level.
    pub fn floor(&self, threshold_bps: f64) -> DataRate {
        self.floor_index(threshold_bps)
            .map_or_else(|| self.min(), |index| self.levels[index])
    }

    /// Greatest level not exceeding either bound. No fallback: `None` when even
    /// the minimum level is above one of them.
    pub fn floor_capped(&self, threshold_bps: f64, cap: DataRate) -> Option<DataRate> {
        self.levels
            .iter()
            .rev()
            .find(|level| level.bps_float() <= threshold_bps && **level <= cap)
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DataRate> + '_ {
        self.levels.iter().copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn kbps_levels(levels: &[i64]) -> QualityLevelSet {
        QualityLevelSet::new(levels.iter().map(|l| DataRate::from_kbps(*l)).collect()).unwrap()
    }

    #[test]
    fn rejects_empty_set() {
        assert_eq!(
            QualityLevelSet::new(vec![]),
            Err(PandaError::EmptyQualityLevels)
        );
    }

    #[test]
    fn rejects_unsorted_and_duplicate_levels() {
        let unsorted = vec![DataRate::from_kbps(1000), DataRate::from_kbps(500)];
        assert!(matches!(
            QualityLevelSet::new(unsorted),
            Err(PandaError::UnsortedQualityLevels { .. })
        ));

        let duplicate = vec![DataRate::from_kbps(500), DataRate::from_kbps(500)];
        assert!(matches!(
            QualityLevelSet::new(duplicate),
            Err(PandaError::UnsortedQualityLevels { .. })
        ));
    }

    #[test]
    fn rejects_zero_rate() {
        assert_eq!(
            QualityLevelSet::new(vec![DataRate::zero(), DataRate::from_kbps(1)]),
            Err(PandaError::NonPositiveQualityLevel(DataRate::zero()))
        );
    }

    #[test]
    fn floor_lookups() {
        let levels = kbps_levels(&[500, 1000, 2000, 4000]);
        assert_eq!(levels.floor_index(1_000_000.0), Some(1));
        assert_eq!(levels.floor_index(999_999.0), Some(0));
        assert_eq!(levels.floor_index(100.0), None);
        assert_eq!(levels.floor(100.0), DataRate::from_kbps(500));
        assert_eq!(levels.floor(1e12), DataRate::from_kbps(4000));
    }

    #[test]
    fn floor_capped_has_no_fallback() {
        let levels = kbps_levels(&[500, 1000, 2000, 4000]);
        assert_eq!(
            levels.floor_capped(3_000_000.0, DataRate::from_kbps(1000)),
            Some(DataRate::from_kbps(1000))
        );
        assert_eq!(
            levels.floor_capped(1_500_000.0, DataRate::from_kbps(4000)),
            Some(DataRate::from_kbps(1000))
        );
        assert_eq!(levels.floor_capped(100_000.0, DataRate::from_kbps(4000)), None);
    }

    #[test]
    fn indexing() {
        let levels = kbps_levels(&[500, 1000]);
        assert_eq!(levels.min(), DataRate::from_kbps(500));
        assert_eq!(levels.max(), DataRate::from_kbps(1000));
        assert_eq!(levels.get_clamped(7), DataRate::from_kbps(1000));
        assert_eq!(levels.index_of(DataRate::from_kbps(1000)), Some(1));
        assert!(!levels.contains(DataRate::from_kbps(750)));
        assert_eq!(levels.len(), 2);
    }
}
