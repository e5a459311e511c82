/*
 *  Copyright 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

// Shared by every unit type. A macro rather than a trait, as trait methods
// can't be const. Every unit is an i64 with the extremes reserved for +/-
// infinity.
macro_rules! unit_base {
    ($ty:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $ty(i64);

        impl $ty {
            pub const fn zero() -> Self {
                Self(0)
            }

            pub const fn plus_infinity() -> Self {
                Self(i64::MAX)
            }

            pub const fn minus_infinity() -> Self {
                Self(i64::MIN)
            }

            pub const fn is_zero(&self) -> bool {
                self.0 == 0
            }

            pub const fn is_finite(&self) -> bool {
                !self.is_infinite()
            }

            pub const fn is_infinite(&self) -> bool {
                self.0 == i64::MAX || self.0 == i64::MIN
            }

            pub const fn is_plus_infinity(&self) -> bool {
                self.0 == i64::MAX
            }

            pub const fn is_minus_infinity(&self) -> bool {
                self.0 == i64::MIN
            }
        }

        // Conversion helpers for the public accessors. Each unit only needs
        // some of them.
        #[allow(dead_code)]
        impl $ty {
            const fn from_fraction(denominator: i64, value: i64) -> Self {
                assert!(denominator >= 0);
                Self::from_value(value * denominator)
            }

            fn from_fraction_float(denominator: f64, value: f64) -> Self {
                Self::from_value_float(value * denominator)
            }

            const fn to_fraction(&self, denominator: i64) -> i64 {
                self.divide_round_to_nearest(denominator)
            }

            const fn divide_round_to_nearest(&self, d: i64) -> i64 {
                assert!(d >= 0);

                let v = self.to_value();
                let mut result = v / d;
                let remainder = v % d;

                if remainder.abs() * 2 >= d.abs() {
                    if (v < 0) != (d < 0) {
                        result -= 1
                    } else {
                        result += 1
                    }
                }
                result
            }

            fn to_fraction_float(&self, denominator: f64) -> f64 {
                assert!(denominator >= 0.0);
                self.to_value_float() / denominator
            }

            const fn from_value(value: i64) -> Self {
                assert!(value != i64::MAX && value != i64::MIN);
                if Self::ONE_SIDED {
                    assert!(value >= 0);
                }

                Self(value)
            }

            fn from_value_float(value: f64) -> Self {
                assert!(!value.is_nan());

                if value == f64::INFINITY {
                    return Self::plus_infinity();
                }

                if Self::ONE_SIDED {
                    assert!(value >= 0.0);
                }

                if value == f64::NEG_INFINITY {
                    Self::minus_infinity()
                } else {
                    Self(value as i64)
                }
            }

            const fn to_value(&self) -> i64 {
                assert!(self.is_finite());
                self.0
            }

            fn to_value_float(&self) -> f64 {
                if self.is_plus_infinity() {
                    f64::INFINITY
                } else if self.is_minus_infinity() {
                    f64::NEG_INFINITY
                } else {
                    self.0 as f64
                }
            }
        }
    };
}

pub(crate) use unit_base;

#[cfg(test)]
mod test {
    use std::fmt;

    use approx::assert_relative_eq;

    use crate::api::units::relative_unit;

    relative_unit!(TestUnit);

    impl TestUnit {
        const ONE_SIDED: bool = false;

        pub const fn from_kilo(kilo: i64) -> Self {
            Self::from_fraction(1000, kilo)
        }

        pub fn from_kilo_float(kilo: f64) -> Self {
            Self::from_fraction_float(1000.0, kilo)
        }

        pub const fn to_kilo(&self) -> i64 {
            self.to_fraction(1000)
        }

        pub fn to_kilo_float(&self) -> f64 {
            self.to_fraction_float(1000.0)
        }
    }

    impl fmt::Debug for TestUnit {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            if self.is_plus_infinity() {
                write!(f, "+inf")
            } else if self.is_minus_infinity() {
                write!(f, "-inf")
            } else {
                write!(f, "{}", self.0)
            }
        }
    }

    #[test]
    fn const_expr() {
        const VALUE: i64 = -12345;
        const ZERO: TestUnit = TestUnit::zero();
        const PLUS_INF: TestUnit = TestUnit::plus_infinity();
        const MINUS_INF: TestUnit = TestUnit::minus_infinity();

        assert!(ZERO.is_zero());
        assert!(PLUS_INF.is_plus_infinity());
        assert!(MINUS_INF.is_minus_infinity());
        assert_eq!(PLUS_INF.to_value_float(), f64::INFINITY);
        assert!(PLUS_INF > ZERO);

        const KILO: TestUnit = TestUnit::from_kilo(VALUE);
        assert_eq!(KILO.to_kilo(), VALUE);
        assert_eq!(TestUnit::from_value(500) / 2, TestUnit::from_value(250));
    }

    #[test]
    fn get_back_same_values() {
        const VALUE: i64 = 499;
        for sign in [-1, 0, 1] {
            let value: i64 = VALUE * sign;
            assert_eq!(TestUnit::from_kilo(value).to_kilo(), value);
            assert_eq!(TestUnit::from_value(value).to_value(), value);
        }
        assert_eq!(TestUnit::zero().to_value(), 0);
    }

    #[test]
    fn identity_checks() {
        const VALUE: i64 = 3000;
        assert!(!TestUnit::from_kilo(VALUE).is_zero());
        assert!(TestUnit::plus_infinity().is_infinite());
        assert!(TestUnit::minus_infinity().is_infinite());
        assert!(!TestUnit::from_kilo(-VALUE).is_infinite());
        assert!(TestUnit::from_kilo(-VALUE).is_finite());
        assert!(!TestUnit::plus_infinity().is_minus_infinity());
    }

    #[test]
    fn converts_to_and_from_double() {
        const VALUE: i64 = 17017;
        const KILO_DOUBLE: f64 = VALUE as f64 * 1e-3;

        assert_relative_eq!(TestUnit::from_value(VALUE).to_kilo_float(), KILO_DOUBLE);
        assert_eq!(TestUnit::from_kilo_float(KILO_DOUBLE).to_value(), VALUE);
        assert_eq!(TestUnit::from_value_float(VALUE as f64).to_value(), VALUE);

        assert!(TestUnit::from_kilo_float(f64::INFINITY).is_plus_infinity());
        assert!(TestUnit::from_kilo_float(f64::NEG_INFINITY).is_minus_infinity());
        assert_eq!(TestUnit::plus_infinity().to_kilo_float(), f64::INFINITY);
    }

    #[test]
    #[should_panic]
    fn crashes_when_created_from_nan() {
        TestUnit::from_value_float(f64::NAN);
    }

    #[test]
    fn math_operations() {
        const VALUE_A: i64 = 267;
        const VALUE_B: i64 = 450;
        let a = TestUnit::from_kilo(VALUE_A);
        let b = TestUnit::from_kilo(VALUE_B);
        assert_eq!((a + b).to_kilo(), VALUE_A + VALUE_B);
        assert_eq!((a - b).to_kilo(), VALUE_A - VALUE_B);
        assert_eq!((TestUnit::from_value(VALUE_A) * 2.0).to_value(), VALUE_A * 2);
        assert_eq!(b / a, VALUE_B as f64 / VALUE_A as f64);

        let mut mutable = a;
        mutable += b;
        assert_eq!(mutable, TestUnit::from_kilo(VALUE_A + VALUE_B));
        mutable -= b;
        assert_eq!(mutable, a);

        // Division by an int rounds towards zero to follow regular int division.
        assert_eq!(TestUnit::from_value(789) / 10, TestUnit::from_value(78));
        assert_eq!(TestUnit::from_value(-789) / 10, TestUnit::from_value(-78));
    }

    #[test]
    fn infinity_operations() {
        let finite = TestUnit::from_value(267);
        assert!((TestUnit::plus_infinity() + finite).is_plus_infinity());
        assert!((finite - TestUnit::minus_infinity()).is_plus_infinity());
        assert!((TestUnit::minus_infinity() + finite).is_minus_infinity());
        assert!((finite - TestUnit::plus_infinity()).is_minus_infinity());
        assert_eq!(-TestUnit::plus_infinity(), TestUnit::minus_infinity());
    }
}
