// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Typed view over a [`ClocksData`] snapshot.
//!
//! [`Timings`] exposes the snapshot's reference instants as typed points and
//! wraps the router and tick conversions behind named methods, so calling
//! code reads as `timings.to_trigger_time(hit)` rather than spelling out
//! generic parameters.
//!
//! ```
//! use detclock::{ClocksConfig, ClocksData, SimulationTime};
//! use qtty::Microseconds;
//!
//! let clocks = ClocksData::for_job(&ClocksConfig::default())
//!     .unwrap()
//!     .with_trigger(Microseconds::new(10.0), Microseconds::new(10.0));
//! let timings = clocks.timings();
//!
//! // 1 ns after the simulation origin
//! let deposit = SimulationTime::new(-4_049_999.0);
//! let elec = timings.to_electronics_time(deposit);
//! assert!((elec.value() - 0.001).abs() < 1e-6);
//! assert_eq!(timings.to_tpc_tick(elec).count(), 3_180);
//! ```

use crate::category::{
    BeamGate, ClockedCategory, Electronics, OpticalElectronics, Simulation, TpcElectronics,
    Trigger,
};
use crate::clocks_data::ClocksData;
use crate::interval::Interval;
use crate::point::Point;
use crate::router::HubRule;
use crate::tick::{ElectronicsTick, OpticalTick, Tick, TickNumber, TpcTick};
use qtty::Microsecond;

/// Borrowed, typed view of one snapshot.
#[derive(Debug, Copy, Clone)]
pub struct Timings<'a> {
    clocks: &'a ClocksData,
}

impl ClocksData {
    /// Typed view of this snapshot.
    #[inline]
    pub fn timings(&self) -> Timings<'_> {
        Timings::new(self)
    }
}

impl<'a> Timings<'a> {
    #[inline]
    pub const fn new(clocks: &'a ClocksData) -> Self {
        Self { clocks }
    }

    /// The underlying snapshot.
    #[inline]
    pub const fn clocks_data(&self) -> &'a ClocksData {
        self.clocks
    }

    // ── reference instants ────────────────────────────────────────────

    #[inline]
    pub fn trigger_time(&self) -> Point<Electronics> {
        Point::from_quantity(self.clocks.trigger_time())
    }

    #[inline]
    pub fn beam_gate_time(&self) -> Point<Electronics> {
        Point::from_quantity(self.clocks.beam_gate_time())
    }

    /// Electronics time of TPC tick 0.
    #[inline]
    pub fn tpc_time(&self) -> Point<Electronics> {
        Point::from_quantity(self.clocks.tpc_time())
    }

    // ── scale conversions ─────────────────────────────────────────────

    #[inline]
    pub fn to_electronics_time<F: HubRule>(&self, point: Point<F>) -> Point<Electronics> {
        point.to(self.clocks)
    }

    #[inline]
    pub fn to_trigger_time<F: HubRule>(&self, point: Point<F>) -> Point<Trigger> {
        point.to(self.clocks)
    }

    #[inline]
    pub fn to_beam_gate_time<F: HubRule>(&self, point: Point<F>) -> Point<BeamGate> {
        point.to(self.clocks)
    }

    #[inline]
    pub fn to_simulation_time<F: HubRule>(&self, point: Point<F>) -> Point<Simulation> {
        point.to(self.clocks)
    }

    /// Convert to any category: `timings.to_time_scale::<BeamGate, _>(p)`.
    #[inline]
    pub fn to_time_scale<T: HubRule, F: HubRule>(&self, point: Point<F>) -> Point<T> {
        point.to(self.clocks)
    }

    // ── ticks ─────────────────────────────────────────────────────────

    /// Tick of `T`'s clock at `point`: `timings.to_tick::<TpcElectronics, f64, _>(p)`.
    #[inline]
    pub fn to_tick<T, N, F>(&self, point: Point<F>) -> Tick<T, N>
    where
        T: ClockedCategory + HubRule,
        N: TickNumber,
        F: HubRule,
    {
        point.to::<T>(self.clocks).to_tick(self.clocks)
    }

    /// TPC-clock tick counted from electronics start.
    #[inline]
    pub fn to_electronics_tick<F: HubRule>(&self, point: Point<F>) -> ElectronicsTick {
        self.to_tick::<Electronics, i64, F>(point)
    }

    /// TPC-clock tick counted from TPC readout start.
    #[inline]
    pub fn to_tpc_tick<F: HubRule>(&self, point: Point<F>) -> TpcTick {
        self.to_tick::<TpcElectronics, i64, F>(point)
    }

    #[inline]
    pub fn to_optical_tick<F: HubRule>(&self, point: Point<F>) -> OpticalTick {
        self.to_tick::<OpticalElectronics, i64, F>(point)
    }

    // ── clock periods ─────────────────────────────────────────────────

    /// Tick period of the clock driving category `C`.
    #[inline]
    pub fn clock_period_for<C: ClockedCategory>(&self) -> Interval<Microsecond> {
        Interval::from_quantity(self.clocks.clock(C::CLOCK).tick_period())
    }

    #[inline]
    pub fn tpc_clock_period(&self) -> Interval<Microsecond> {
        self.clock_period_for::<TpcElectronics>()
    }

    #[inline]
    pub fn optical_clock_period(&self) -> Interval<Microsecond> {
        self.clock_period_for::<OpticalElectronics>()
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
            .with_trigger(Microseconds::new(20.0), Microseconds::new(15.0))
    }

    #[test]
    fn reference_instants() {
        let c = clocks();
        let t = c.timings();
        assert_eq!(t.trigger_time().value(), 20.0);
        assert_eq!(t.beam_gate_time().value(), 15.0);
        assert_eq!(t.tpc_time().value(), -1_580.0);
        assert_eq!(t.clocks_data(), &c);
    }

    #[test]
    fn named_conversions_agree_with_router() {
        let c = clocks();
        let t = c.timings();
        let p = Point::<Electronics>::new(50.0);
        assert_eq!(t.to_trigger_time(p).value(), 30.0);
        assert_eq!(t.to_beam_gate_time(p).value(), 35.0);
        assert_eq!(t.to_time_scale::<BeamGate, _>(p), t.to_beam_gate_time(p));
        assert_eq!(t.to_electronics_time(t.to_trigger_time(p)), p);
        let sim = t.to_simulation_time(p);
        assert!((sim.value() - (50.0 - 4_050.0) * 1e3).abs() < 1e-6);
    }

    #[test]
    fn tick_conversions() {
        let c = clocks();
        let t = c.timings();
        let p = Point::<Trigger>::new(0.0);
        assert_eq!(t.to_electronics_tick(p).count(), 40);
        assert_eq!(t.to_tpc_tick(p).count(), 3_200);
        assert_eq!(t.to_optical_tick(p).count(), 1_280);
        let frac = t.to_tick::<TpcElectronics, f64, _>(Point::<Trigger>::new(0.25));
        assert_eq!(frac.count(), 3_200.5);
    }

    #[test]
    fn clock_periods() {
        let c = clocks();
        let t = c.timings();
        assert_eq!(t.tpc_clock_period().value(), 0.5);
        assert_eq!(t.optical_clock_period().value(), 1.0 / 64.0);
        assert_eq!(
            t.clock_period_for::<Electronics>().value(),
            t.tpc_clock_period().value()
        );
    }
}
