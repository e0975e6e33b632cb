//! Precision-safe token amounts.
//!
//! Uses `rust_decimal` for exact decimal arithmetic. The Gateway reports
//! balances as decimal strings; `Amount` round-trips them without
//! floating-point rounding errors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Token amount with exact decimal precision.
///
/// Wraps `Decimal` to provide type safety and the zero-clamped
/// arithmetic the reconciliation rules require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Add, clamped at zero.
    ///
    /// Optimistic balance corrections must never produce a negative
    /// stored balance.
    #[inline]
    pub fn saturating_add(&self, rhs: Amount) -> Self {
        let sum = self.0 + rhs.0;
        if sum.is_sign_negative() {
            Self::ZERO
        } else {
            Self(sum)
        }
    }

    /// Subtract, clamped at zero.
    #[inline]
    pub fn saturating_sub(&self, rhs: Amount) -> Self {
        let diff = self.0 - rhs.0;
        if diff.is_sign_negative() {
            Self::ZERO
        } else {
            Self(diff)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
