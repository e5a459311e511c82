/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

//! Timestamp represents the time that has passed since some unspecified epoch,
//! normally the creation of the session clock. The epoch is assumed to be before
//! any represented timestamps. The difference of two Timestamps is a TimeDelta.
super::unit_base!(Timestamp);

use std::fmt;
use std::ops::*;

use super::TimeDelta;

impl Timestamp {
    const ONE_SIDED: bool = false;

    pub const fn from_seconds(value: i64) -> Self {
        Self::from_fraction(1_000_000, value)
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

    pub const fn ms(&self) -> i64 {
        self.to_fraction(1_000)
    }

    pub const fn us(&self) -> i64 {
        self.to_value()
    }
}

impl Add<TimeDelta> for Timestamp {
    type Output = Self;

    fn add(self, delta: TimeDelta) -> Self {
        if self.is_plus_infinity() || delta.is_plus_infinity() {
            assert!(!self.is_minus_infinity());
            assert!(!delta.is_minus_infinity());
            return Self::plus_infinity();
        } else if self.is_minus_infinity() || delta.is_minus_infinity() {
            assert!(!self.is_plus_infinity());
            assert!(!delta.is_plus_infinity());
            return Self::minus_infinity();
        }
        Timestamp::from_micros(self.us() + delta.us())
    }
}

impl Sub<TimeDelta> for Timestamp {
    type Output = Self;

    fn sub(self, delta: TimeDelta) -> Self {
        if self.is_plus_infinity() || delta.is_minus_infinity() {
            assert!(!self.is_minus_infinity());
            assert!(!delta.is_plus_infinity());
            return Self::plus_infinity();
        } else if self.is_minus_infinity() || delta.is_plus_infinity() {
            assert!(!self.is_plus_infinity());
            assert!(!delta.is_minus_infinity());
            return Self::minus_infinity();
        }
        Timestamp::from_micros(self.us() - delta.us())
    }
}

impl Sub for Timestamp {
    type Output = TimeDelta;

    fn sub(self, other: Self) -> TimeDelta {
        if self.is_plus_infinity() || other.is_minus_infinity() {
            assert!(!self.is_minus_infinity());
            assert!(!other.is_plus_infinity());
            return TimeDelta::plus_infinity();
        } else if self.is_minus_infinity() || other.is_plus_infinity() {
            assert!(!self.is_plus_infinity());
            assert!(!other.is_minus_infinity());
            return TimeDelta::minus_infinity();
        }
        TimeDelta::from_micros(self.us() - other.us())
    }
}

impl AddAssign<TimeDelta> for Timestamp {
    fn add_assign(&mut self, delta: TimeDelta) {
        *self = *self + delta;
    }
}

impl SubAssign<TimeDelta> for Timestamp {
    fn sub_assign(&mut self, delta: TimeDelta) {
        *self = *self - delta;
    }
}

impl fmt::Debug for Timestamp {
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
    use super::*;

    #[test]
    fn get_back_same_values() {
        const VALUE: i64 = 499;
        assert_eq!(Timestamp::from_millis(VALUE).ms(), VALUE);
        assert_eq!(Timestamp::from_micros(VALUE).us(), VALUE);
        assert_eq!(Timestamp::from_seconds(VALUE).seconds(), VALUE);
    }

    #[test]
    fn comparison_operators() {
        const SMALL: i64 = 450;
        const LARGE: i64 = 451;

        assert!(Timestamp::plus_infinity() > Timestamp::from_millis(LARGE));
        assert_eq!(Timestamp::from_millis(SMALL), Timestamp::from_millis(SMALL));
        assert!(Timestamp::from_millis(SMALL) < Timestamp::from_millis(LARGE));
        assert!(Timestamp::from_millis(LARGE) >= Timestamp::from_millis(SMALL));
    }

    #[test]
    fn timestamp_and_time_delta_math() {
        const VALUE_A: i64 = 267;
        const VALUE_B: i64 = 450;
        const TIME_A: Timestamp = Timestamp::from_millis(VALUE_A);
        const TIME_B: Timestamp = Timestamp::from_millis(VALUE_B);
        const DELTA_A: TimeDelta = TimeDelta::from_millis(VALUE_A);
        const DELTA_B: TimeDelta = TimeDelta::from_millis(VALUE_B);

        assert_eq!(TIME_A - TIME_B, TimeDelta::from_millis(VALUE_A - VALUE_B));
        assert_eq!(TIME_B - DELTA_A, Timestamp::from_millis(VALUE_B - VALUE_A));
        assert_eq!(TIME_B + DELTA_A, Timestamp::from_millis(VALUE_B + VALUE_A));

        let mut mutable_time: Timestamp = TIME_A;
        mutable_time += DELTA_B;
        assert_eq!(mutable_time, TIME_A + DELTA_B);
        mutable_time -= DELTA_B;
        assert_eq!(mutable_time, TIME_A);
    }

    #[test]
    fn infinity_operations() {
        const FINITE_TIME: Timestamp = Timestamp::from_millis(267);
        const FINITE_DELTA: TimeDelta = TimeDelta::from_millis(267);
        assert!((Timestamp::plus_infinity() + FINITE_DELTA).is_infinite());
        assert!((FINITE_TIME + TimeDelta::plus_infinity()).is_infinite());
        assert!((FINITE_TIME - TimeDelta::minus_infinity()).is_infinite());
        assert!((Timestamp::plus_infinity() - FINITE_TIME).is_plus_infinity());
    }
}
