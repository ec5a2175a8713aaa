// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale category markers.
//!
//! Each zero-sized type names one time axis of a detector event. Values on
//! different axes have different types, so mixing them up is a build error
//! rather than a wrong number.
//!
//! # Electronics axes
//!
//! | Marker | Axis | Zero at | Clock |
//! |--------|------|---------|-------|
//! | [`Electronics`] | electronics time | electronics start | TPC |
//! | [`TpcElectronics`] | TPC readout | TPC tick 0 | TPC |
//! | [`OpticalElectronics`] | optical readout | electronics start | optical |
//! | [`TriggerElectronics`] | trigger hardware | electronics start | trigger |
//! | [`ExternalElectronics`] | external clock | electronics start | external |
//!
//! # Reference axes
//!
//! | Marker | Axis | Zero at | Unit |
//! |--------|------|---------|------|
//! | [`Trigger`] | trigger time | hardware trigger | µs |
//! | [`BeamGate`] | beam-gate time | beam gate opening | µs |
//! | [`Simulation`] | simulation time | simulation origin | ns |
//!
//! Where each zero lies in electronics time is a property of the event, not
//! of the category; the mapping lives in [`router`](crate::router).

use crate::clock::ClockId;
use crate::units::TimeUnit;
use qtty::{Microsecond, Nanosecond};

/// Marker trait for time-scale categories.
pub trait TimeCategory: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Point`](crate::Point) formatting.
    const LABEL: &'static str;

    /// Native unit of values on this axis.
    type Unit: TimeUnit;
}

/// Categories whose values may be compared or subtracted against `C`.
///
/// Every category is compatible with itself and with nothing else; moving
/// between axes goes through the router.
pub trait CompatibleWith<C: TimeCategory>: TimeCategory {}

impl<C: TimeCategory> CompatibleWith<C> for C {}

/// Categories driven by a hardware clock, and therefore having ticks.
pub trait ClockedCategory: TimeCategory<Unit = Microsecond> {
    /// The clock whose ticks discretise this axis.
    const CLOCK: ClockId;
}

// ---------------------------------------------------------------------------
// Electronics axes
// ---------------------------------------------------------------------------

/// Electronics time: the hub axis every other scale is related to.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Electronics;

impl TimeCategory for Electronics {
    const LABEL: &'static str = "Electronics";
    type Unit = Microsecond;
}

impl ClockedCategory for Electronics {
    const CLOCK: ClockId = ClockId::Tpc;
}

/// TPC electronics time: zero at the first TPC readout tick.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TpcElectronics;

impl TimeCategory for TpcElectronics {
    const LABEL: &'static str = "TPC";
    type Unit = Microsecond;
}

impl ClockedCategory for TpcElectronics {
    const CLOCK: ClockId = ClockId::Tpc;
}

/// Optical-detector electronics time.
///
/// Shares the electronics start; readout positions are located by an
/// explicit frame/sample pair on the optical clock.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct OpticalElectronics;

impl TimeCategory for OpticalElectronics {
    const LABEL: &'static str = "Optical";
    type Unit = Microsecond;
}

impl ClockedCategory for OpticalElectronics {
    const CLOCK: ClockId = ClockId::Optical;
}

/// Trigger-hardware electronics time.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TriggerElectronics;

impl TimeCategory for TriggerElectronics {
    const LABEL: &'static str = "TriggerClock";
    type Unit = Microsecond;
}

impl ClockedCategory for TriggerElectronics {
    const CLOCK: ClockId = ClockId::Trigger;
}

/// External-clock electronics time.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct ExternalElectronics;

impl TimeCategory for ExternalElectronics {
    const LABEL: &'static str = "External";
    type Unit = Microsecond;
}

impl ClockedCategory for ExternalElectronics {
    const CLOCK: ClockId = ClockId::External;
}

// ---------------------------------------------------------------------------
// Reference axes
// ---------------------------------------------------------------------------

/// Trigger time: zero when the hardware trigger fires.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Trigger;

impl TimeCategory for Trigger {
    const LABEL: &'static str = "Trigger";
    type Unit = Microsecond;
}

/// Beam-gate time: zero when the beam window opens.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct BeamGate;

impl TimeCategory for BeamGate {
    const LABEL: &'static str = "BeamGate";
    type Unit = Microsecond;
}

/// Simulation time, in nanoseconds.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Simulation;

impl TimeCategory for Simulation {
    const LABEL: &'static str = "Simulation";
    type Unit = Nanosecond;
}
