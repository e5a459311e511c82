/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use std::fmt;
use std::time::Duration;

// TimeDelta represents the difference between two timestamps. Here it is used
// for download durations, pacing delays, buffer levels and segment durations.
// It can be constructed and converted to seconds (s), milliseconds (ms) and
// microseconds (us). Unlike DataRate it may be negative: a target delay
// computed from a starving buffer can drop below zero.
super::relative_unit!(TimeDelta);

impl TimeDelta {
    const ONE_SIDED: bool = false;

    pub const fn from_seconds(value: i64) -> Self {
        Self::from_fraction(1_000_000, value)
    }

    pub fn from_seconds_float(value: f64) -> Self {
        Self::from_fraction_float(1_000_000.0, value)
    }

    pub const fn from_millis(value: i64) -> Self {
        Self::from_fraction(1_000, value)
    }

    pub const fn from_micros(value: i64) -> Self {
        Self::from_value(value)
    }

    pub const fn seconds(&self) -> i64 {
        self.to_fraction(1_000_000)
    }

    pub fn seconds_float(&self) -> f64 {
        self.to_fraction_float(1_000_000.0)
    }

    pub const fn ms(&self) -> i64 {
        self.to_fraction(1_000)
    }

    pub const fn us(&self) -> i64 {
        self.to_value()
    }

    /// Converts to a std `Duration`, `None` for negative or infinite deltas.
    pub fn to_std(&self) -> Option<Duration> {
        if self.is_infinite() || self.0 < 0 {
            return None;
        }
        Some(Duration::from_micros(self.0 as u64))
    }
}

impl fmt::Debug for TimeDelta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_plus_infinity() {
            write!(f, "+inf ms")
        } else if self.is_minus_infinity() {
            write!(f, "-inf ms")
        } else if self.us() == 0 || (self.us() % 1000) != 0 {
            write!(f, "{} us", self.us())
        } else if self.ms() % 1000 != 0 {
            write!(f, "{} ms", self.ms())
        } else {
            write!(f, "{} s", self.seconds())
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn const_expr() {
        const VALUE: i64 = -12345;
        const ZERO: TimeDelta = TimeDelta::zero();
        const PLUS_INF: TimeDelta = TimeDelta::plus_infinity();
        assert_eq!(TimeDelta::default(), ZERO);
        assert!(ZERO.is_zero());
        assert!(PLUS_INF.is_plus_infinity());

        const SECONDS: TimeDelta = TimeDelta::from_seconds(VALUE);
        const MS: TimeDelta = TimeDelta::from_millis(VALUE);
        const US: TimeDelta = TimeDelta::from_micros(VALUE);
        assert_eq!(SECONDS.seconds(), VALUE);
        assert_eq!(MS.ms(), VALUE);
        assert_eq!(US.us(), VALUE);
    }

    #[test]
    fn get_different_prefix() {
        const VALUE: i64 = 3000000;
        assert_eq!(TimeDelta::from_micros(VALUE).seconds(), VALUE / 1000000);
        assert_eq!(TimeDelta::from_millis(VALUE).seconds(), VALUE / 1000);
        assert_eq!(TimeDelta::from_seconds(VALUE).us(), VALUE * 1000000);
    }

    #[test]
    fn converts_to_and_from_double() {
        const MICROS: i64 = 17017;
        const MILLIS_DOUBLE: f64 = MICROS as f64 * 1e-3;
        const SECONDS_DOUBLE: f64 = MILLIS_DOUBLE * 1e-3;

        assert_relative_eq!(TimeDelta::from_micros(MICROS).seconds_float(), SECONDS_DOUBLE);
        assert_eq!(TimeDelta::from_seconds_float(SECONDS_DOUBLE).us(), MICROS);
        assert!(TimeDelta::from_seconds_float(f64::INFINITY).is_plus_infinity());
        assert!(TimeDelta::from_seconds_float(f64::NEG_INFINITY).is_minus_infinity());
    }

    #[test]
    fn negation() {
        let negative = TimeDelta::from_millis(-250);
        assert_eq!(-negative, TimeDelta::from_millis(250));
        assert!(negative < TimeDelta::zero());
    }

    #[test]
    fn converts_to_std_duration() {
        assert_eq!(
            TimeDelta::from_millis(1500).to_std(),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(TimeDelta::from_millis(-1).to_std(), None);
        assert_eq!(TimeDelta::plus_infinity().to_std(), None);
    }
}
