// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Clock ticks on a category's axis.
//!
//! A [`Tick<C, N>`] counts ticks of the clock that drives category `C`,
//! starting at `C`'s zero. The count type `N` selects between the integral
//! form (`i64`, truncating toward zero) and the fractional form (`f64`).
//!
//! ```
//! use detclock::{ClocksConfig, ClocksData, TpcElectronicsTime, TpcTick, TpcTickD};
//!
//! let clocks = ClocksData::for_job(&ClocksConfig::default()).unwrap();
//!
//! let t = TpcElectronicsTime::new(2.75); // 2 MHz TPC clock
//! let whole: TpcTick = t.to_tick(&clocks);
//! let exact: TpcTickD = t.to_tick(&clocks);
//! assert_eq!(whole.count(), 5);
//! assert_eq!(exact.count(), 5.5);
//! ```
//!
//! Categories without a clock have no ticks:
//!
//! ```compile_fail
//! use detclock::{Simulation, Tick};
//!
//! let _ = Tick::<Simulation>::new(3);
//! ```

use crate::category::{
    ClockedCategory, Electronics, ExternalElectronics, OpticalElectronics, TpcElectronics,
    TriggerElectronics,
};
use crate::clock::truncate_count;
use crate::clocks_data::ClocksData;
use crate::point::Point;
use crate::router::{HubRule, Route};
use std::fmt::{Debug, Display};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric type of a tick count.
pub trait TickNumber:
    Copy + Debug + Display + PartialEq + PartialOrd + Add<Output = Self> + Sub<Output = Self> + 'static
{
    /// `true` when fractional ticks are truncated.
    const INTEGRAL: bool;

    /// Convert a fractional tick count, truncating toward zero if integral.
    ///
    /// Integral counts within rounding distance of an integer snap to it.
    /// Out-of-range values saturate and NaN becomes zero.
    fn from_ticks(ticks: f64) -> Self;

    fn to_f64(self) -> f64;
}

impl TickNumber for i64 {
    const INTEGRAL: bool = true;

    #[inline]
    fn from_ticks(ticks: f64) -> Self {
        truncate_count(ticks, ticks) as i64
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl TickNumber for f64 {
    const INTEGRAL: bool = false;

    #[inline]
    fn from_ticks(ticks: f64) -> Self {
        ticks
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// A tick count on the clock of category `C`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tick<C: ClockedCategory, N: TickNumber = i64> {
    count: N,
    _category: PhantomData<C>,
}

/// TPC-clock ticks from electronics start.
pub type ElectronicsTick = Tick<Electronics, i64>;
/// TPC-clock ticks from TPC readout start.
pub type TpcTick = Tick<TpcElectronics, i64>;
/// Optical-clock ticks from electronics start.
pub type OpticalTick = Tick<OpticalElectronics, i64>;
/// Trigger-clock ticks from electronics start.
pub type TriggerTick = Tick<TriggerElectronics, i64>;
/// External-clock ticks from electronics start.
pub type ExternalTick = Tick<ExternalElectronics, i64>;

pub type ElectronicsTickD = Tick<Electronics, f64>;
pub type TpcTickD = Tick<TpcElectronics, f64>;
pub type OpticalTickD = Tick<OpticalElectronics, f64>;
pub type TriggerTickD = Tick<TriggerElectronics, f64>;
pub type ExternalTickD = Tick<ExternalElectronics, f64>;

impl<C: ClockedCategory, N: TickNumber> Tick<C, N> {
    #[inline]
    pub const fn new(count: N) -> Self {
        Self {
            count,
            _category: PhantomData,
        }
    }

    /// The raw tick count.
    #[inline]
    pub const fn count(&self) -> N {
        self.count
    }

    /// The instant of this tick on `C`'s axis.
    #[inline]
    pub fn to_point(&self, clocks: &ClocksData) -> Point<C> {
        let period = clocks.clock(C::CLOCK).tick_period();
        Point::new(self.count.to_f64() * period.value())
    }

    /// The same tick with a fractional count.
    #[inline]
    pub fn to_fractional(&self) -> Tick<C, f64> {
        Tick::new(self.count.to_f64())
    }
}

impl<C: ClockedCategory> Tick<C, f64> {
    /// Drop the fractional part, toward zero.
    #[inline]
    pub fn truncate(&self) -> Tick<C, i64> {
        Tick::new(i64::from_ticks(self.count))
    }
}

impl<C: ClockedCategory + HubRule, N: TickNumber> Tick<C, N> {
    /// The same instant as a tick on the clock of category `T`.
    ///
    /// Within one category only the count type changes.
    pub fn to<T: ClockedCategory + HubRule, M: TickNumber>(&self, clocks: &ClocksData) -> Tick<T, M> {
        if Route::between::<C, T>() == Route::Identity {
            return Tick::new(M::from_ticks(self.count.to_f64()));
        }
        self.to_point(clocks).to::<T>(clocks).to_tick(clocks)
    }
}

impl<C: ClockedCategory> Point<C> {
    /// The tick of `C`'s clock at this instant.
    #[inline]
    pub fn to_tick<N: TickNumber>(&self, clocks: &ClocksData) -> Tick<C, N> {
        let period = clocks.clock(C::CLOCK).tick_period();
        Tick::new(N::from_ticks(self.value() / period.value()))
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl<C: ClockedCategory, N: TickNumber> Display for Tick<C, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} tick {}", C::LABEL, self.count)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<C: ClockedCategory, N: TickNumber + Serialize> Serialize for Tick<C, N> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        self.count.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, C: ClockedCategory, N: TickNumber + Deserialize<'de>> Deserialize<'de> for Tick<C, N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        N::deserialize(deserializer).map(Self::new)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<C: ClockedCategory, N: TickNumber> Add<N> for Tick<C, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: N) -> Self {
        Self::new(self.count + rhs)
    }
}

impl<C: ClockedCategory, N: TickNumber> AddAssign<N> for Tick<C, N> {
    #[inline]
    fn add_assign(&mut self, rhs: N) {
        *self = *self + rhs;
    }
}

impl<C: ClockedCategory, N: TickNumber> Sub<N> for Tick<C, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: N) -> Self {
        Self::new(self.count - rhs)
    }
}

impl<C: ClockedCategory, N: TickNumber> SubAssign<N> for Tick<C, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: N) {
        *self = *self - rhs;
    }
}

impl<C: ClockedCategory, N: TickNumber> Sub for Tick<C, N> {
    type Output = N;
    #[inline]
    fn sub(self, rhs: Self) -> N {
        self.count - rhs.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClocksConfig;
    use qtty::Microseconds;

    fn clocks() -> ClocksData {
        ClocksData::for_job(&ClocksConfig::default())
            .unwrap()
            .with_trigger(Microseconds::new(0.0), Microseconds::new(0.0))
    }

    #[test]
    fn integral_ticks_truncate_toward_zero() {
        let c = clocks();
        let t: TpcTick = Point::<TpcElectronics>::new(1.9).to_tick(&c);
        assert_eq!(t.count(), 3);
        let t: TpcTick = Point::<TpcElectronics>::new(-1.9).to_tick(&c);
        assert_eq!(t.count(), -3);
    }

    #[test]
    fn fractional_ticks_keep_fraction() {
        let c = clocks();
        let t: OpticalTickD = Point::<OpticalElectronics>::new(1.0 / 128.0).to_tick(&c);
        assert!((t.count() - 0.5).abs() < 1e-12);
        assert_eq!(t.truncate().count(), 0);
    }

    #[test]
    fn tick_to_point_uses_category_clock() {
        let c = clocks();
        assert_eq!(TpcTick::new(4).to_point(&c).value(), 2.0);
        assert_eq!(TriggerTick::new(16).to_point(&c).value(), 1.0);
        assert!((ExternalTickD::new(62.5).to_point(&c).value() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn tpc_tick_to_electronics_tick_adds_offset() {
        // default offset puts TPC tick 0 at -1600 us, i.e. 3200 TPC ticks early
        let c = clocks();
        let e: ElectronicsTick = TpcTick::new(3_200).to(&c);
        assert_eq!(e.count(), 0);
        let back: TpcTick = e.to(&c);
        assert_eq!(back.count(), 3_200);
    }

    #[test]
    fn ticks_across_clocks() {
        let c = clocks();
        let optical: OpticalTick = ElectronicsTick::new(2).to(&c);
        assert_eq!(optical.count(), 64);
    }

    #[test]
    fn arithmetic() {
        let mut t = TpcTick::new(10);
        t += 5;
        t -= 2_i64;
        assert_eq!(t.count(), 13);
        assert_eq!((t + 7) - t, 7);
        assert_eq!((t - 3_i64).count(), 10);
        assert!(TpcTick::new(1) < TpcTick::new(2));
        assert_eq!(t.to_fractional().count(), 13.0);
    }

    #[test]
    fn same_category_keeps_the_count() {
        let c = clocks();
        for n in [1_001, 2_001, 3_999, 123_457] {
            let t: ExternalTick = ExternalTick::new(n).to(&c);
            assert_eq!(t.count(), n);
            let d: ExternalTickD = ExternalTick::new(n).to(&c);
            assert_eq!(d.count(), n as f64);
            let back: ExternalTick = d.to(&c);
            assert_eq!(back.count(), n);
        }
    }

    #[test]
    fn external_ticks_survive_the_time_round_trip() {
        // 31.25 MHz: n * period / period lands just below n for these
        let c = clocks();
        for n in [1_001_i64, 2_001, 4_003, 99_991] {
            let p = ExternalTick::new(n).to_point(&c);
            let t: ExternalTick = p.to_tick(&c);
            assert_eq!(t.count(), n);
            assert_eq!(ExternalTickD::new(n as f64).truncate().count(), n);
        }
    }

    #[test]
    fn display() {
        assert_eq!(TpcTick::new(7).to_string(), "TPC tick 7");
    }

    #[test]
    fn integral_flag() {
        assert!(<i64 as TickNumber>::INTEGRAL);
        assert!(!<f64 as TickNumber>::INTEGRAL);
        assert_eq!(i64::from_ticks(f64::NAN), 0);
        assert_eq!(i64::from_ticks(1e300), i64::MAX);
    }
}
