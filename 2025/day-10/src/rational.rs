//! Exact rational numbers for the elimination engine.
//!
//! Only the handful of operations Gauss-Jordan elimination and the press
//! search need are implemented. Every value is kept in lowest terms with a
//! strictly positive denominator, so equality is structural and the
//! integrality check is just `denom == 1`.

use num_integer::Integer;
use std::fmt;
use std::ops::{Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: i64,
    denom: i64,
}

impl Rational {
    pub const ZERO: Self = Self { numer: 0, denom: 1 };
    pub const ONE: Self = Self { numer: 1, denom: 1 };

    /// Creates a reduced rational.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn new(numer: i64, denom: i64) -> Self {
        assert!(denom != 0, "rational with zero denominator");
        match Self::reduce(numer as i128, denom as i128) {
            Some(r) => r,
            None => panic!("rational {numer}/{denom} does not fit after normalisation"),
        }
    }

    pub const fn from_integer(n: i64) -> Self {
        Self { numer: n, denom: 1 }
    }

    pub const fn numer(self) -> i64 {
        self.numer
    }

    /// Denominator in lowest terms, always `>= 1`.
    pub const fn denom(self) -> i64 {
        self.denom
    }

    pub const fn is_zero(self) -> bool {
        self.numer == 0
    }

    pub const fn is_integer(self) -> bool {
        self.denom == 1
    }

    pub const fn to_integer(self) -> Option<i64> {
        match self.denom {
            1 => Some(self.numer),
            _ => None,
        }
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let (a, b) = (self.numer as i128, self.denom as i128);
        let (c, d) = (rhs.numer as i128, rhs.denom as i128);
        Self::reduce(a * d - c * b, b * d)
    }

    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        Self::reduce(
            self.numer as i128 * rhs.numer as i128,
            self.denom as i128 * rhs.denom as i128,
        )
    }

    /// Returns `None` on overflow or when `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        Self::reduce(
            self.numer as i128 * rhs.denom as i128,
            self.denom as i128 * rhs.numer as i128,
        )
    }

    fn reduce(numer: i128, denom: i128) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        if numer == 0 {
            return Some(Self::ZERO);
        }
        let (numer, denom) = if denom < 0 {
            (-numer, -denom)
        } else {
            (numer, denom)
        };
        let g = numer.gcd(&denom);
        Some(Self {
            numer: i64::try_from(numer / g).ok()?,
            denom: i64::try_from(denom / g).ok()?,
        })
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.denom {
            1 => write!(f, "{}", self.numer),
            _ => write!(f, "{}/{}", self.numer, self.denom),
        }
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match self.checked_sub(rhs) {
            Some(r) => r,
            None => panic!("attempt to subtract {rhs} from {self} with overflow"),
        }
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match self.checked_mul(rhs) {
            Some(r) => r,
            None => panic!("attempt to multiply {self} by {rhs} with overflow"),
        }
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        assert!(!rhs.is_zero(), "attempt to divide {self} by zero");
        match self.checked_div(rhs) {
            Some(r) => r,
            None => panic!("attempt to divide {self} by {rhs} with overflow"),
        }
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self::ZERO - self
    }
}
