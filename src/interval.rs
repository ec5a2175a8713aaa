// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Elapsed time.
//!
//! [`Interval<U>`] is a duration stored as a `Quantity<U>`. It forms a group
//! under addition (zero, negation, sum) and can be scaled by plain numbers.
//! An interval carries no category: "three microseconds" means the same
//! thing on every time scale, which is exactly why a [`Point`](crate::Point)
//! may be shifted by it.
//!
//! Intervals in different units compare after rescaling the right-hand
//! side; arithmetic between them requires an explicit [`Interval::to`].

use crate::units::{rescale, TimeUnit};
use qtty::{Microsecond, Quantity};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A duration measured in unit `U` (microseconds by default).
#[derive(Debug, Copy, Clone)]
pub struct Interval<U: TimeUnit = Microsecond> {
    quantity: Quantity<U>,
}

impl<U: TimeUnit> Interval<U> {
    /// The empty interval.
    pub const ZERO: Self = Self::new(0.0);

    /// Create from a raw scalar in unit `U`.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Quantity::<U>::new(value),
        }
    }

    /// Create from a quantity.
    #[inline]
    pub const fn from_quantity(quantity: Quantity<U>) -> Self {
        Self { quantity }
    }

    /// The underlying quantity.
    #[inline]
    pub const fn quantity(&self) -> Quantity<U> {
        self.quantity
    }

    /// The underlying scalar in unit `U`.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Rescale to another unit.
    #[inline]
    pub fn to<V: TimeUnit>(&self) -> Interval<V> {
        Interval::from_quantity(rescale::<U, V>(self.quantity))
    }

    /// Magnitude of the interval.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.value().abs())
    }

    /// Shorter of two intervals.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other.value() < self.value() {
            other
        } else {
            self
        }
    }

    /// Longer of two intervals.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other.value() > self.value() {
            other
        } else {
            self
        }
    }

    /// `true` for the zero interval.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value() == 0.0
    }
}

impl<U: TimeUnit> Default for Interval<U> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<U: TimeUnit> std::fmt::Display for Interval<U>
where
    Quantity<U>: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.quantity)
    }
}

// ── Comparison (across units) ─────────────────────────────────────────────

impl<U: TimeUnit, V: TimeUnit> PartialEq<Interval<V>> for Interval<U> {
    #[inline]
    fn eq(&self, other: &Interval<V>) -> bool {
        self.value() == rescale::<V, U>(other.quantity).value()
    }
}

impl<U: TimeUnit, V: TimeUnit> PartialOrd<Interval<V>> for Interval<U> {
    #[inline]
    fn partial_cmp(&self, other: &Interval<V>) -> Option<Ordering> {
        self.value()
            .partial_cmp(&rescale::<V, U>(other.quantity).value())
    }
}

// ── Group structure ───────────────────────────────────────────────────────

impl<U: TimeUnit> Add for Interval<U> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value() + rhs.value())
    }
}

impl<U: TimeUnit> AddAssign for Interval<U> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<U: TimeUnit> Sub for Interval<U> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value() - rhs.value())
    }
}

impl<U: TimeUnit> SubAssign for Interval<U> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<U: TimeUnit> Neg for Interval<U> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value())
    }
}

// ── Scaling ───────────────────────────────────────────────────────────────

impl<U: TimeUnit> Mul<f64> for Interval<U> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value() * rhs)
    }
}

impl<U: TimeUnit> Mul<Interval<U>> for f64 {
    type Output = Interval<U>;
    #[inline]
    fn mul(self, rhs: Interval<U>) -> Interval<U> {
        rhs * self
    }
}

impl<U: TimeUnit> Div<f64> for Interval<U> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.value() / rhs)
    }
}

/// Ratio of two intervals of the same unit.
impl<U: TimeUnit> Div for Interval<U> {
    type Output = f64;
    #[inline]
    fn div(self, rhs: Self) -> f64 {
        self.value() / rhs.value()
    }
}

// ── From/Into Quantity ────────────────────────────────────────────────────

impl<U: TimeUnit> From<Quantity<U>> for Interval<U> {
    #[inline]
    fn from(quantity: Quantity<U>) -> Self {
        Self::from_quantity(quantity)
    }
}

impl<U: TimeUnit> From<Interval<U>> for Quantity<U> {
    #[inline]
    fn from(interval: Interval<U>) -> Self {
        interval.quantity
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<U: TimeUnit> Serialize for Interval<U> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, U: TimeUnit> Deserialize<'de> for Interval<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::{Microseconds, Nanosecond};

    #[test]
    fn zero_is_additive_identity() {
        let a = Interval::<Microsecond>::new(3.5);
        assert_eq!(a + Interval::ZERO, a);
        assert!(Interval::<Microsecond>::default().is_zero());
    }

    #[test]
    fn negation_is_additive_inverse() {
        let a = Interval::<Microsecond>::new(3.5);
        assert!((a + (-a)).is_zero());
        assert_eq!(a - a, Interval::<Microsecond>::ZERO);
    }

    #[test]
    fn scaling_by_numbers() {
        let a = Interval::<Microsecond>::new(2.0);
        assert_eq!((a * 3.0).value(), 6.0);
        assert_eq!((3.0 * a).value(), 6.0);
        assert_eq!((a / 4.0).value(), 0.5);
        assert_eq!(a * 3.0 / a, 3.0);
    }

    #[test]
    fn assign_operators() {
        let mut a = Interval::<Microsecond>::new(1.0);
        a += Interval::new(2.0);
        assert_eq!(a.value(), 3.0);
        a -= Interval::new(0.5);
        assert_eq!(a.value(), 2.5);
    }

    #[test]
    fn compares_across_units_after_rescale() {
        let us = Interval::<Microsecond>::new(1.0);
        let ns = Interval::<Nanosecond>::new(1_000.0);
        assert!((us - ns.to::<Microsecond>()).abs() < Interval::<Nanosecond>::new(1e-9));
        assert!(Interval::<Nanosecond>::new(999.0) < us);
        assert!(us > Interval::<Nanosecond>::new(999.0));
    }

    #[test]
    fn explicit_rescale() {
        let ns: Interval<Nanosecond> = Interval::<Microsecond>::new(1.6).to();
        assert!((ns.value() - 1_600.0).abs() < 1e-9);
    }

    #[test]
    fn abs_min_max() {
        let a = Interval::<Microsecond>::new(-4.0);
        let b = Interval::<Microsecond>::new(1.0);
        assert_eq!(a.abs().value(), 4.0);
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn quantity_roundtrip() {
        let q = Microseconds::new(12.0);
        let i: Interval = q.into();
        let back: Microseconds = i.into();
        assert_eq!(back.value(), 12.0);
    }

    #[test]
    fn display_uses_quantity() {
        let s = format!("{}", Interval::<Microsecond>::new(2.0));
        assert!(s.contains('2'));
    }
}
