// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time units usable on a detector time axis.
//!
//! Quantities are plain [`qtty`] values: `Microseconds`, `Nanoseconds`, …
//! qtty already refuses to add a length to a time; on top of that, this
//! module marks which units may carry a *time axis* ([`TimeUnit`]) and
//! provides the one explicit rescale used everywhere else in the crate.
//!
//! Rescaling routes through the **microsecond** hub unit, mirroring how
//! every time scale routes through electronics time:
//!
//! ```text
//! Quantity<U> → Microseconds → Quantity<V>
//! ```
//!
//! When `U` and `V` are the same unit the value is returned untouched, so a
//! same-unit rescale never perturbs the last bit.

use qtty::{
    Microsecond, Microseconds, Millisecond, Milliseconds, Nanosecond, Nanoseconds, Quantity,
    Second, Seconds, Unit,
};
use std::any::TypeId;

/// A qtty unit that can carry a point on a time axis.
pub trait TimeUnit: Unit + 'static {
    /// Express a quantity of this unit in microseconds.
    fn to_microseconds(quantity: Quantity<Self>) -> Microseconds;

    /// Build a quantity of this unit from microseconds.
    fn from_microseconds(quantity: Microseconds) -> Quantity<Self>;
}

/// Whether two time units are the same type.
#[inline]
pub(crate) fn same_unit<U: TimeUnit, V: TimeUnit>() -> bool {
    TypeId::of::<U>() == TypeId::of::<V>()
}

/// Convert a time quantity from unit `U` to unit `V`.
///
/// ```
/// use detclock::rescale;
/// use qtty::{Microsecond, Nanoseconds};
///
/// let us = rescale::<_, Microsecond>(Nanoseconds::new(2_500.0));
/// assert!((us.value() - 2.5).abs() < 1e-12);
/// ```
#[inline]
pub fn rescale<U: TimeUnit, V: TimeUnit>(quantity: Quantity<U>) -> Quantity<V> {
    if same_unit::<U, V>() {
        Quantity::<V>::new(quantity.value())
    } else {
        V::from_microseconds(U::to_microseconds(quantity))
    }
}

impl TimeUnit for Microsecond {
    #[inline(always)]
    fn to_microseconds(quantity: Microseconds) -> Microseconds {
        quantity
    }

    #[inline(always)]
    fn from_microseconds(quantity: Microseconds) -> Microseconds {
        quantity
    }
}

/// Generate [`TimeUnit`] for units that convert to microseconds through qtty.
macro_rules! impl_time_unit {
    ($($unit:ty => $quantity:ty),+ $(,)?) => {
        $(
            impl TimeUnit for $unit {
                #[inline]
                fn to_microseconds(quantity: $quantity) -> Microseconds {
                    quantity.to::<Microsecond>()
                }

                #[inline]
                fn from_microseconds(quantity: Microseconds) -> $quantity {
                    quantity.to::<$unit>()
                }
            }
        )+
    };
}

impl_time_unit!(
    Nanosecond => Nanoseconds,
    Millisecond => Milliseconds,
    Second => Seconds,
);
