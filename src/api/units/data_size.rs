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

// DataSize is a payload size. The internal storage is bytes; manifest payloads
// are often reported in bits, so bit conversions are provided as well.
super::relative_unit!(DataSize);

impl DataSize {
    const ONE_SIDED: bool = true;

    pub const fn from_bytes(value: i64) -> Self {
        Self::from_value(value)
    }

    /// Rounds to the nearest whole byte.
    pub const fn from_bits(value: i64) -> Self {
        Self::from_value((value + 4) / 8)
    }

    pub const fn bytes(&self) -> i64 {
        self.to_value()
    }

    pub fn bits_float(&self) -> f64 {
        self.to_value_float() * 8.0
    }

    pub(crate) const fn microbits(&self) -> i64 {
        const MAX_BEFORE_CONVERSION: i64 = i64::MAX / 8000000;
        assert!(
            self.bytes() <= MAX_BEFORE_CONVERSION,
            "size is too large to be expressed in microbits"
        );
        self.bytes() * 8000000
    }
}

impl fmt::Debug for DataSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_plus_infinity() {
            write!(f, "+inf bytes")
        } else if self.is_minus_infinity() {
            write!(f, "-inf bytes")
        } else {
            write!(f, "{} bytes", self.bytes())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_back_same_values() {
        const VALUE: i64 = 123 * 8;
        assert_eq!(DataSize::from_bytes(VALUE).bytes(), VALUE);
    }

    #[test]
    fn converts_bits() {
        assert_eq!(DataSize::from_bits(1_000_000).bytes(), 125_000);
        assert_eq!(DataSize::from_bits(1_000_000).bits_float(), 1_000_000.0);
        assert_eq!(DataSize::from_bits(12).bytes(), 2);
    }

    #[test]
    fn identity_checks() {
        assert!(DataSize::zero().is_zero());
        assert!(DataSize::plus_infinity().is_infinite());
        assert!(DataSize::from_bytes(10).is_finite());
    }
}
