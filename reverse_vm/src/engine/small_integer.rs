// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Integer-tagged Number.
///
/// Holds exactly the integers that a Number can represent without loss,
/// ie. the range `-(2^53 - 1)..=2^53 - 1`. Packed integer element storage
/// consists of these.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SmallInteger(i64);

impl std::fmt::Debug for SmallInteger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for SmallInteger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SmallInteger {
    pub const MIN_NUMBER: i64 = -(2i64.pow(53)) + 1;
    pub const MAX_NUMBER: i64 = 2i64.pow(53) - 1;

    #[inline]
    pub const fn into_i64(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn into_f64(self) -> f64 {
        self.0 as f64
    }

    pub const fn zero() -> SmallInteger {
        Self(0)
    }

    const fn from_i64_unchecked(value: i64) -> SmallInteger {
        debug_assert!(Self::MIN_NUMBER <= value && value <= Self::MAX_NUMBER);
        Self(value)
    }
}

impl std::ops::Neg for SmallInteger {
    type Output = Self;

    /// The range is symmetric so negation never leaves it.
    fn neg(self) -> Self::Output {
        Self::from_i64_unchecked(-self.0)
    }
}

impl TryFrom<i64> for SmallInteger {
    type Error = ();
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN_NUMBER..=Self::MAX_NUMBER).contains(&value) {
            Ok(Self::from_i64_unchecked(value))
        } else {
            Err(())
        }
    }
}

impl TryFrom<u64> for SmallInteger {
    type Error = ();
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value <= Self::MAX_NUMBER as u64 {
            Ok(Self::from_i64_unchecked(value as i64))
        } else {
            Err(())
        }
    }
}

impl TryFrom<usize> for SmallInteger {
    type Error = ();
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::try_from(value as u64)
    }
}

impl TryFrom<f64> for SmallInteger {
    type Error = ();

    /// Fails for fractional values, non-finite values, values outside the
    /// safe integer range and for negative zero.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.fract() != 0.0
            || !(Self::MIN_NUMBER as f64..=Self::MAX_NUMBER as f64).contains(&value)
            || (value == 0.0 && value.is_sign_negative())
        {
            return Err(());
        }
        Ok(Self::from_i64_unchecked(value as i64))
    }
}

macro_rules! from_numeric_type {
    ($numtype:ty) => {
        // Checking at compile-time that $numtype fully fits within the range.
        const _: () = {
            assert!(
                <$numtype>::MIN as i64 >= SmallInteger::MIN_NUMBER,
                concat!(
                    stringify!($numtype),
                    " is outside of the SmallInteger range (min)"
                )
            );
            assert!(
                <$numtype>::MAX as i64 <= SmallInteger::MAX_NUMBER,
                concat!(
                    stringify!($numtype),
                    " is outside of the SmallInteger range (max)"
                )
            );
        };
        impl From<$numtype> for SmallInteger {
            fn from(value: $numtype) -> Self {
                Self::from_i64_unchecked(i64::from(value))
            }
        }
    };
}
from_numeric_type!(u8);
from_numeric_type!(i8);
from_numeric_type!(u16);
from_numeric_type!(i16);
from_numeric_type!(u32);
from_numeric_type!(i32);

impl From<SmallInteger> for i64 {
    fn from(value: SmallInteger) -> Self {
        value.0
    }
}

impl From<SmallInteger> for f64 {
    fn from(value: SmallInteger) -> Self {
        value.into_f64()
    }
}

#[test]
fn valid_small_integers() {
    assert_eq!(0i64, SmallInteger::from(0).into_i64());
    assert_eq!(23i64, SmallInteger::from(23u8).into_i64());
    assert_eq!(-59i64, SmallInteger::from(-59).into_i64());
    assert_eq!(
        SmallInteger::MAX_NUMBER,
        SmallInteger::try_from(SmallInteger::MAX_NUMBER)
            .unwrap()
            .into_i64()
    );
    assert_eq!(
        SmallInteger::MIN_NUMBER,
        (-SmallInteger::try_from(SmallInteger::MAX_NUMBER).unwrap()).into_i64()
    );
    assert_eq!(
        4294967295i64,
        SmallInteger::try_from(4294967295.0f64).unwrap().into_i64()
    );
}

#[test]
fn invalid_small_integers() {
    assert_eq!(
        SmallInteger::try_from(SmallInteger::MAX_NUMBER + 1),
        Err(())
    );
    assert_eq!(
        SmallInteger::try_from(SmallInteger::MIN_NUMBER - 1),
        Err(())
    );
    assert_eq!(SmallInteger::try_from(i64::MIN), Err(()));
    assert_eq!(SmallInteger::try_from(u64::MAX), Err(()));
    assert_eq!(SmallInteger::try_from(0.5f64), Err(()));
    assert_eq!(SmallInteger::try_from(-0.0f64), Err(()));
    assert_eq!(SmallInteger::try_from(f64::NAN), Err(()));
    assert_eq!(SmallInteger::try_from(f64::INFINITY), Err(()));
    assert_eq!(SmallInteger::try_from(2f64.powi(53)), Err(()));
}
