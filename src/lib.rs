// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Detector clocks
//!
//! Typed time scales, readout clocks, and conversions between the time axes
//! of a particle-detector event.
//!
//! # Core types
//!
//! - [`Point<C>`] — an instant on the time axis of category `C`.
//! - [`Interval<U>`] — a duration in time unit `U`.
//! - [`Tick<C, N>`] — a tick count on the clock driving category `C`.
//! - [`ClockState`] — one readout clock: frequency, frame period, current time.
//! - [`ClocksData`] — the per-event time reference every conversion needs.
//! - [`Timings`] — typed view over a [`ClocksData`].
//! - [`ClockService`] — validates configuration and hands out snapshots.
//!
//! # Time axes
//!
//! | Marker | Alias | Unit | Zero at |
//! |--------|-------|------|---------|
//! | [`Electronics`] | [`ElectronicsTime`] | µs | electronics start |
//! | [`TpcElectronics`] | [`TpcElectronicsTime`] | µs | TPC tick 0 |
//! | [`OpticalElectronics`] | [`OpticalElectronicsTime`] | µs | electronics start |
//! | [`TriggerElectronics`] | [`TriggerElectronicsTime`] | µs | electronics start |
//! | [`ExternalElectronics`] | [`ExternalElectronicsTime`] | µs | electronics start |
//! | [`Trigger`] | [`TriggerTime`] | µs | hardware trigger |
//! | [`BeamGate`] | [`BeamGateTime`] | µs | beam-gate opening |
//! | [`Simulation`] | [`SimulationTime`] | ns | simulation origin |
//!
//! Values on different axes never mix implicitly; [`Point::to`] moves a value
//! between axes through electronics time, given the event's [`ClocksData`].
//!
//! # Units
//!
//! Quantities are [`qtty`] quantities. Mixing units is a build error:
//!
//! ```compile_fail
//! use qtty::{Microseconds, Nanoseconds};
//!
//! let _ = Microseconds::new(1.0) + Nanoseconds::new(1.0);
//! ```
//!
//! Convert explicitly with [`rescale`] or `Quantity::to`.
//!
//! # Example
//!
//! ```
//! use detclock::{ClockService, ClocksConfig, EventTiming, TriggerRecord, TriggerTime};
//! use qtty::Microseconds;
//!
//! let service = ClockService::new(ClocksConfig::default()).unwrap();
//! let event = EventTiming::default().with_trigger(TriggerRecord::new(
//!     Microseconds::new(10.0),
//!     Microseconds::new(8.0),
//! ));
//! let clocks = service.data_for_event(&event);
//!
//! // a TPC hit on tick 3240 of the readout
//! let hit = clocks.tpc_tick_to_time(3_240.0);
//! assert_eq!(hit.value(), 30.0);
//!
//! let rel: TriggerTime = detclock::ElectronicsTime::from_quantity(hit).to(&clocks);
//! assert_eq!(rel.value(), 20.0);
//! ```

pub mod category;
pub mod clock;
pub mod clocks_data;
pub mod config;
pub mod error;
pub mod interval;
pub mod point;
pub mod router;
pub mod service;
pub mod tick;
pub mod timings;
pub mod units;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use category::{
    BeamGate, ClockedCategory, CompatibleWith, Electronics, ExternalElectronics,
    OpticalElectronics, Simulation, TimeCategory, TpcElectronics, Trigger, TriggerElectronics,
};
pub use clock::{ClockId, ClockState};
pub use clocks_data::{ClockSet, ClocksData, TriggerOffset};
pub use config::{ClocksConfig, ConfigKey};
pub use error::{ClockError, Error, Result};
pub use interval::Interval;
pub use point::Point;
pub use router::{HubRule, Route};
pub use service::{ClockService, EventTiming, TriggerRecord};
pub use tick::{
    ElectronicsTick, ElectronicsTickD, ExternalTick, ExternalTickD, OpticalTick, OpticalTickD,
    Tick, TickNumber, TpcTick, TpcTickD, TriggerTick, TriggerTickD,
};
pub use timings::Timings;
pub use units::{rescale, TimeUnit};

// ── Axis aliases ──────────────────────────────────────────────────────────

/// Electronics time, the hub axis.
pub type ElectronicsTime = Point<Electronics>;

/// Time on the TPC readout axis.
pub type TpcElectronicsTime = Point<TpcElectronics>;

pub type OpticalElectronicsTime = Point<OpticalElectronics>;

pub type TriggerElectronicsTime = Point<TriggerElectronics>;

pub type ExternalElectronicsTime = Point<ExternalElectronics>;

/// Time relative to the hardware trigger.
pub type TriggerTime = Point<Trigger>;

/// Time relative to the beam-gate opening.
pub type BeamGateTime = Point<BeamGate>;

/// Simulation time, in nanoseconds.
pub type SimulationTime = Point<Simulation>;
