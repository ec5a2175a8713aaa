// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Category-tagged instants.
//!
//! [`Point<C>`] stores one quantity in the native unit of its category `C`.
//! It has affine structure with respect to [`Interval`]:
//!
//! ```text
//! Point<C> − Point<C>     → Interval
//! Point<C> ± Interval<U>  → Point<C>
//! ```
//!
//! There is no `Point + Point`, and points of different categories cannot be
//! subtracted or compared; moving a point to another axis goes through
//! [`Point::to`](crate::router), which needs the event's
//! [`ClocksData`](crate::ClocksData).
//!
//! ```compile_fail
//! use detclock::{ElectronicsTime, TriggerTime};
//!
//! let a = ElectronicsTime::new(10.0);
//! let b = TriggerTime::new(3.0);
//! let _ = a - b; // different categories
//! ```
//!
//! ```compile_fail
//! use detclock::ElectronicsTime;
//!
//! let a = ElectronicsTime::new(10.0);
//! let _ = a + a; // points do not add
//! ```

use crate::category::{CompatibleWith, TimeCategory};
use crate::interval::Interval;
use crate::units::{rescale, TimeUnit};
use qtty::Quantity;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A point on time axis `C`.
///
/// Layout-identical to one `f64`: the category is a zero-sized marker.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Point<C: TimeCategory> {
    quantity: Quantity<C::Unit>,
    _category: PhantomData<C>,
}

impl<C: TimeCategory> Point<C> {
    /// The zero of this axis.
    pub const ORIGIN: Self = Self::new(0.0);

    /// Create from a raw scalar in the category's native unit.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Quantity::<C::Unit>::new(value),
            _category: PhantomData,
        }
    }

    /// Create from a quantity in the category's native unit.
    #[inline]
    pub const fn from_quantity(quantity: Quantity<C::Unit>) -> Self {
        Self {
            quantity,
            _category: PhantomData,
        }
    }

    /// Create from a quantity in any time unit.
    #[inline]
    pub fn from_any<U: TimeUnit>(quantity: Quantity<U>) -> Self {
        Self::from_quantity(rescale::<U, C::Unit>(quantity))
    }

    /// The underlying quantity.
    #[inline]
    pub const fn quantity(&self) -> Quantity<C::Unit> {
        self.quantity
    }

    /// The underlying scalar in the native unit.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Distance from the axis origin.
    #[inline]
    pub fn since_origin(&self) -> Interval<C::Unit> {
        Interval::from_quantity(self.quantity)
    }

    /// Earlier of two instants.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other.value() < self.value() {
            other
        } else {
            self
        }
    }

    /// Later of two instants.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other.value() > self.value() {
            other
        } else {
            self
        }
    }

    /// Midpoint between two instants on the same axis.
    #[inline]
    pub fn mean(self, other: Self) -> Self {
        Self::new(0.5 * (self.value() + other.value()))
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl<C: TimeCategory> std::fmt::Display for Point<C>
where
    Quantity<C::Unit>: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", C::LABEL, self.quantity)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<C: TimeCategory> Serialize for Point<C> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, C: TimeCategory> Deserialize<'de> for Point<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<C: TimeCategory, U: TimeUnit> Add<Interval<U>> for Point<C> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Interval<U>) -> Self::Output {
        Self::new(self.value() + rescale::<U, C::Unit>(rhs.quantity()).value())
    }
}

impl<C: TimeCategory, U: TimeUnit> AddAssign<Interval<U>> for Point<C> {
    #[inline]
    fn add_assign(&mut self, rhs: Interval<U>) {
        *self = *self + rhs;
    }
}

impl<C: TimeCategory, U: TimeUnit> Sub<Interval<U>> for Point<C> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Interval<U>) -> Self::Output {
        Self::new(self.value() - rescale::<U, C::Unit>(rhs.quantity()).value())
    }
}

impl<C: TimeCategory, U: TimeUnit> SubAssign<Interval<U>> for Point<C> {
    #[inline]
    fn sub_assign(&mut self, rhs: Interval<U>) {
        *self = *self - rhs;
    }
}

impl<C: TimeCategory, D: CompatibleWith<C>> Sub<Point<D>> for Point<C> {
    type Output = Interval<C::Unit>;
    #[inline]
    fn sub(self, rhs: Point<D>) -> Self::Output {
        Interval::new(self.value() - rescale::<D::Unit, C::Unit>(rhs.quantity).value())
    }
}

// ── From/Into Quantity ────────────────────────────────────────────────────

impl<C: TimeCategory> From<Quantity<C::Unit>> for Point<C> {
    #[inline]
    fn from(quantity: Quantity<C::Unit>) -> Self {
        Self::from_quantity(quantity)
    }
}
