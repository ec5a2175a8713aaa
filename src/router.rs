// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Conversions between time scales.
//!
//! Every category relates to **electronics time**, the hub axis, through a
//! single rule: the electronics-time instant at which the category reads
//! zero ([`HubRule::origin`]). Converting from `F` to `T` goes
//! `F → Electronics → T`, so `N` categories need `N` rules rather than `N²`
//! pairwise conversions, and each inverse is derived from the same origin.
//!
//! ```
//! use detclock::{ClocksConfig, ClocksData, ElectronicsTime, TriggerTime};
//! use qtty::Microseconds;
//!
//! let clocks = ClocksData::for_job(&ClocksConfig::default())
//!     .unwrap()
//!     .with_trigger(Microseconds::new(100.0), Microseconds::new(90.0));
//!
//! let hit = ElectronicsTime::new(130.0);
//! let rel: TriggerTime = hit.to(&clocks);
//! assert_eq!(rel.value(), 30.0);
//! ```
//!
//! A category with no rule cannot be routed:
//!
//! ```compile_fail
//! use detclock::{ClocksConfig, ClocksData, ElectronicsTime, TimeCategory};
//! use qtty::Microsecond;
//!
//! #[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
//! struct Readout;
//!
//! impl TimeCategory for Readout {
//!     const LABEL: &'static str = "Readout";
//!     type Unit = Microsecond;
//! }
//!
//! let clocks = ClocksData::for_job(&ClocksConfig::default()).unwrap();
//! let _ = ElectronicsTime::new(1.0).to::<Readout>(&clocks);
//! ```

use crate::category::{
    BeamGate, Electronics, ExternalElectronics, OpticalElectronics, Simulation, TimeCategory,
    TpcElectronics, Trigger, TriggerElectronics,
};
use crate::clocks_data::ClocksData;
use crate::point::Point;
use crate::units::rescale;
use qtty::{Microsecond, Microseconds, Quantity};
use std::any::TypeId;
use tracing::trace;

/// How a category relates to electronics time.
pub trait HubRule: TimeCategory {
    /// Electronics time at which this category reads zero.
    fn origin(clocks: &ClocksData) -> Microseconds;

    /// Move a value on this axis to electronics time.
    #[inline]
    fn to_electronics(quantity: Quantity<Self::Unit>, clocks: &ClocksData) -> Microseconds {
        rescale::<Self::Unit, Microsecond>(quantity) + Self::origin(clocks)
    }

    /// Move an electronics time onto this axis.
    #[inline]
    fn from_electronics(time: Microseconds, clocks: &ClocksData) -> Quantity<Self::Unit> {
        rescale::<Microsecond, Self::Unit>(time - Self::origin(clocks))
    }
}

macro_rules! hub_rules {
    ($($category:ty => |$clocks:ident| $origin:expr;)+) => {
        $(
            impl HubRule for $category {
                #[inline]
                fn origin($clocks: &ClocksData) -> Microseconds {
                    $origin
                }
            }
        )+
    };
}

hub_rules! {
    Electronics => |_clocks| Microseconds::new(0.0);
    TpcElectronics => |clocks| clocks.tpc_time();
    OpticalElectronics => |_clocks| Microseconds::new(0.0);
    TriggerElectronics => |_clocks| Microseconds::new(0.0);
    ExternalElectronics => |_clocks| Microseconds::new(0.0);
    Trigger => |clocks| clocks.trigger_time();
    BeamGate => |clocks| clocks.beam_gate_time();
    Simulation => |clocks| Microseconds::new(-clocks.g4_ref_time().value());
}

/// The path a conversion takes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Same category: the value is returned untouched.
    Identity,
    /// One side is electronics time: a single rule applies.
    Direct,
    /// Source to electronics time, then electronics time to target.
    ViaHub,
}

impl Route {
    /// The route from `F` to `T`.
    pub fn between<F: TimeCategory, T: TimeCategory>() -> Self {
        let from = TypeId::of::<F>();
        let to = TypeId::of::<T>();
        let hub = TypeId::of::<Electronics>();
        if from == to {
            Route::Identity
        } else if from == hub || to == hub {
            Route::Direct
        } else {
            Route::ViaHub
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Route::Identity => "identity",
            Route::Direct => "direct",
            Route::ViaHub => "via electronics",
        };
        f.write_str(s)
    }
}

impl<F: HubRule> Point<F> {
    /// This instant on axis `T`, for the event described by `clocks`.
    pub fn to<T: HubRule>(&self, clocks: &ClocksData) -> Point<T> {
        let route = Route::between::<F, T>();
        if route == Route::Identity {
            return Point::from_quantity(rescale::<F::Unit, T::Unit>(self.quantity()));
        }
        let electronics = F::to_electronics(self.quantity(), clocks);
        let out = Point::from_quantity(T::from_electronics(electronics, clocks));
        trace!(
            from = F::LABEL,
            to = T::LABEL,
            %route,
            input = self.value(),
            output = out.value(),
            "time scale conversion"
        );
        out
    }

    /// Shorthand for `to::<Electronics>`.
    #[inline]
    pub fn to_electronics(&self, clocks: &ClocksData) -> Point<Electronics> {
        self.to(clocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClocksConfig;

    fn clocks() -> ClocksData {
        let config = ClocksConfig {
            g4_ref_time: 500_000.0,
            ..ClocksConfig::default()
        };
        ClocksData::for_job(&config)
            .unwrap()
            .with_trigger(Microseconds::new(100.0), Microseconds::new(90.0))
    }

    #[test]
    fn routes() {
        assert_eq!(Route::between::<Trigger, Trigger>(), Route::Identity);
        assert_eq!(Route::between::<Electronics, Trigger>(), Route::Direct);
        assert_eq!(Route::between::<Simulation, Electronics>(), Route::Direct);
        assert_eq!(Route::between::<Trigger, BeamGate>(), Route::ViaHub);
        assert_eq!(Route::ViaHub.to_string(), "via electronics");
    }

    #[test]
    fn origins_follow_the_snapshot() {
        let c = clocks();
        assert_eq!(Electronics::origin(&c).value(), 0.0);
        assert_eq!(OpticalElectronics::origin(&c).value(), 0.0);
        assert_eq!(Trigger::origin(&c).value(), 100.0);
        assert_eq!(BeamGate::origin(&c).value(), 90.0);
        assert_eq!(TpcElectronics::origin(&c), c.tpc_time());
        assert_eq!(Simulation::origin(&c).value(), -500.0);
    }

    #[test]
    fn identity_is_exact() {
        let c = clocks();
        let v = 0.1 + 0.2;
        let p = Point::<Trigger>::new(v);
        assert_eq!(p.to::<Trigger>(&c).value(), v);
    }

    #[test]
    fn trigger_to_beam_gate_goes_via_hub() {
        let c = clocks();
        let b: Point<BeamGate> = Point::<Trigger>::new(5.0).to(&c);
        assert_eq!(b.value(), 15.0);
    }

    #[test]
    fn simulation_matches_g4_to_elec_time() {
        let c = clocks();
        let sim = Point::<Simulation>::new(502_000.0);
        let e = sim.to_electronics(&c);
        let direct = c.g4_to_elec_time(sim.quantity());
        assert!((e.value() - direct.value()).abs() < 1e-9);
        assert!((e.value() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn tpc_axis_starts_at_tpc_time() {
        let c = clocks();
        let e = Point::<Electronics>::from_quantity(c.tpc_time());
        assert!(e.to::<TpcElectronics>(&c).value().abs() < 1e-12);
    }

    #[test]
    fn round_trip_through_every_category() {
        let c = clocks();
        let e = Point::<Electronics>::new(1_234.5);
        macro_rules! check {
            ($($cat:ty),+) => {$(
                let back = e.to::<$cat>(&c).to::<Electronics>(&c);
                assert!((back.value() - e.value()).abs() < 1e-9, "{}", <$cat>::LABEL);
            )+};
        }
        check!(
            TpcElectronics,
            OpticalElectronics,
            TriggerElectronics,
            ExternalElectronics,
            Trigger,
            BeamGate,
            Simulation
        );
    }
}
