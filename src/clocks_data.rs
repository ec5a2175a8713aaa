// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-event time reference.
//!
//! A [`ClocksData`] snapshot holds everything needed to relate the time
//! scales of one processing unit (a job, or one event):
//!
//! - the simulation reference time (`g4_ref_time`),
//! - the trigger and beam-gate times, in electronics time,
//! - the TPC readout offset relative to the trigger,
//! - the four subsystem clocks ([`ClockSet`]).
//!
//! Snapshots are small `Copy` values, built once and never mutated. When
//! the trigger information changes, a new snapshot is produced with
//! [`ClocksData::with_trigger`].
//!
//! All times are microseconds of electronics time unless stated otherwise;
//! simulation times are nanoseconds. Tick arguments are `f64` so that
//! fractional positions survive the conversion.

use crate::clock::{ClockId, ClockState};
use crate::config::ClocksConfig;
use crate::error::{Error, Result};
use qtty::{Microsecond, Microseconds, Nanosecond, Nanoseconds};
use tracing::debug;

/// The TPC readout offset relative to the trigger.
///
/// The configuration value is dual-encoded: a **negative** number is a time
/// in microseconds (the readout opens that long before the trigger), a
/// **non-negative** number is a tick count on the TPC clock (the trigger
/// lands on that tick of the readout). [`TriggerOffset::from_config`] is the
/// only place this sign convention is interpreted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TriggerOffset {
    /// Offset already expressed as time.
    Time(Microseconds),
    /// Offset expressed as TPC ticks from readout start to trigger.
    Ticks(f64),
}

impl TriggerOffset {
    /// Interpret a raw `TriggerOffsetTPC` configuration value.
    pub fn from_config(raw: f64) -> Self {
        if raw < 0.0 {
            TriggerOffset::Time(Microseconds::new(raw))
        } else {
            TriggerOffset::Ticks(raw)
        }
    }

    /// The raw configuration value this offset was read from.
    pub fn raw(&self) -> f64 {
        match *self {
            TriggerOffset::Time(t) => t.value(),
            TriggerOffset::Ticks(n) => n,
        }
    }

    /// Offset of TPC readout start relative to the trigger, as time.
    pub fn resolve(&self, tpc_clock: &ClockState) -> Microseconds {
        match *self {
            TriggerOffset::Time(t) => t,
            TriggerOffset::Ticks(n) => Microseconds::new(-n / tpc_clock.frequency()),
        }
    }
}

/// The four subsystem clocks of a detector.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockSet {
    pub tpc: ClockState,
    pub optical: ClockState,
    pub trigger: ClockState,
    pub external: ClockState,
}

impl ClockSet {
    pub fn new(
        tpc: ClockState,
        optical: ClockState,
        trigger: ClockState,
        external: ClockState,
    ) -> Self {
        Self {
            tpc,
            optical,
            trigger,
            external,
        }
    }

    /// Build all four clocks from configuration, each reading `time`.
    ///
    /// Fails on the first invalid clock, naming it.
    pub fn from_config(config: &ClocksConfig, time: Microseconds) -> Result<Self> {
        let build = |id: ClockId| {
            ClockState::new(time, config.frame_period(), config.clock_speed(id))
                .map_err(|source| Error::invalid_clock(id, source))
        };
        Ok(Self {
            tpc: build(ClockId::Tpc)?,
            optical: build(ClockId::Optical)?,
            trigger: build(ClockId::Trigger)?,
            external: build(ClockId::External)?,
        })
    }

    /// The clock identified by `id`.
    pub fn get(&self, id: ClockId) -> &ClockState {
        match id {
            ClockId::Tpc => &self.tpc,
            ClockId::Optical => &self.optical,
            ClockId::Trigger => &self.trigger,
            ClockId::External => &self.external,
        }
    }

    /// A copy with every clock reading `time`.
    pub fn at_time(&self, time: Microseconds) -> Self {
        Self {
            tpc: self.tpc.with_time(time),
            optical: self.optical.with_time(time),
            trigger: self.trigger.with_time(time),
            external: self.external.with_time(time),
        }
    }
}

/// Time reference snapshot for one processing unit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClocksData {
    g4_ref_time: Microseconds,
    trigger_offset: TriggerOffset,
    trigger_time: Microseconds,
    beam_gate_time: Microseconds,
    clocks: ClockSet,
}

impl ClocksData {
    // ── constructors ──────────────────────────────────────────────────

    /// Assemble a snapshot from already validated parts.
    pub fn new(
        g4_ref_time: Microseconds,
        trigger_offset: TriggerOffset,
        trigger_time: Microseconds,
        beam_gate_time: Microseconds,
        clocks: ClockSet,
    ) -> Self {
        Self {
            g4_ref_time,
            trigger_offset,
            trigger_time,
            beam_gate_time,
            clocks,
        }
    }

    /// Snapshot for job-wide defaults: configured reference, trigger and
    /// beam-gate times.
    pub fn for_job(config: &ClocksConfig) -> Result<Self> {
        Self::for_trigger(
            config,
            config.g4_ref_time().to::<Microsecond>(),
            config.default_trigger_time(),
            config.default_beam_gate_time(),
        )
    }

    /// Snapshot for explicit reference, trigger and beam-gate times.
    ///
    /// Every clock starts at `trigger_time`.
    pub fn for_trigger(
        config: &ClocksConfig,
        g4_ref_time: Microseconds,
        trigger_time: Microseconds,
        beam_gate_time: Microseconds,
    ) -> Result<Self> {
        config.validate()?;
        let clocks = ClockSet::from_config(config, trigger_time)?;
        let data = Self::new(
            g4_ref_time,
            config.trigger_offset(),
            trigger_time,
            beam_gate_time,
            clocks,
        );
        debug!(
            g4_ref_time = g4_ref_time.value(),
            trigger_time = trigger_time.value(),
            beam_gate_time = beam_gate_time.value(),
            "clock snapshot built"
        );
        Ok(data)
    }

    /// A new snapshot with different trigger and beam-gate times.
    ///
    /// Clocks are moved to the new trigger time; everything else is kept.
    pub fn with_trigger(&self, trigger_time: Microseconds, beam_gate_time: Microseconds) -> Self {
        Self {
            trigger_time,
            beam_gate_time,
            clocks: self.clocks.at_time(trigger_time),
            ..*self
        }
    }

    // ── reference values ──────────────────────────────────────────────

    /// Simulation time of the electronics start.
    #[inline]
    pub const fn g4_ref_time(&self) -> Microseconds {
        self.g4_ref_time
    }

    /// The TPC trigger offset as configured.
    #[inline]
    pub const fn trigger_offset(&self) -> TriggerOffset {
        self.trigger_offset
    }

    /// Electronics time of the hardware trigger.
    #[inline]
    pub const fn trigger_time(&self) -> Microseconds {
        self.trigger_time
    }

    /// Electronics time of the beam-gate opening.
    #[inline]
    pub const fn beam_gate_time(&self) -> Microseconds {
        self.beam_gate_time
    }

    /// TPC readout start relative to the trigger.
    #[inline]
    pub fn trigger_offset_tpc(&self) -> Microseconds {
        self.trigger_offset.resolve(&self.clocks.tpc)
    }

    /// Electronics time of TPC tick 0.
    #[inline]
    pub fn tpc_time(&self) -> Microseconds {
        self.trigger_time + self.trigger_offset_tpc()
    }

    /// TPC ticks between readout start and trigger.
    pub fn trigger_offset_ticks(&self) -> i64 {
        (-self.trigger_offset_tpc().value() / self.clocks.tpc.tick_period().value()) as i64
    }

    /// TPC sampling period.
    pub fn sampling_rate(&self) -> Nanoseconds {
        self.clocks.tpc.tick_period().to::<Nanosecond>()
    }

    // ── clocks ────────────────────────────────────────────────────────

    #[inline]
    pub const fn clocks(&self) -> &ClockSet {
        &self.clocks
    }

    #[inline]
    pub fn clock(&self, id: ClockId) -> &ClockState {
        self.clocks.get(id)
    }

    #[inline]
    pub const fn tpc_clock(&self) -> &ClockState {
        &self.clocks.tpc
    }

    #[inline]
    pub const fn optical_clock(&self) -> &ClockState {
        &self.clocks.optical
    }

    #[inline]
    pub const fn trigger_clock(&self) -> &ClockState {
        &self.clocks.trigger
    }

    #[inline]
    pub const fn external_clock(&self) -> &ClockState {
        &self.clocks.external
    }

    // ── simulation ────────────────────────────────────────────────────

    /// Simulation time to electronics time.
    #[inline]
    pub fn g4_to_elec_time(&self, g4_time: Nanoseconds) -> Microseconds {
        Microseconds::new(g4_time.value() * 1e-3 - self.g4_ref_time.value())
    }

    // ── TPC ───────────────────────────────────────────────────────────

    /// TPC tick to trigger time.
    pub fn tpc_tick_to_trig_time(&self, tick: f64) -> Microseconds {
        self.clocks.tpc.time_of_tick(tick) + self.trigger_offset_tpc()
    }

    /// TPC tick to beam-gate time.
    pub fn tpc_tick_to_beam_time(&self, tick: f64) -> Microseconds {
        self.tpc_tick_to_trig_time(tick) + self.trigger_time - self.beam_gate_time
    }

    /// TPC tick to electronics time.
    pub fn tpc_tick_to_time(&self, tick: f64) -> Microseconds {
        self.tpc_time() + self.clocks.tpc.time_of_tick(tick)
    }

    /// TPC tick to TPC-clock ticks counted from electronics start.
    pub fn tpc_tick_to_tdc(&self, tick: f64) -> f64 {
        self.tpc_time().value() / self.clocks.tpc.tick_period().value() + tick
    }

    /// Simulation time to TPC tick.
    pub fn tpc_g4_time_to_tick(&self, g4_time: Nanoseconds) -> f64 {
        (self.g4_to_elec_time(g4_time) - self.tpc_time()).value()
            / self.clocks.tpc.tick_period().value()
    }

    /// Simulation time to TPC-clock ticks counted from electronics start.
    pub fn tpc_g4_time_to_tdc(&self, g4_time: Nanoseconds) -> f64 {
        self.g4_to_elec_time(g4_time).value() / self.clocks.tpc.tick_period().value()
    }

    /// Electronics time to TPC tick.
    pub fn time_to_tick(&self, time: Microseconds) -> f64 {
        (time - self.tpc_time()).value() / self.clocks.tpc.tick_period().value()
    }

    /// TPC-clock ticks counted from electronics start to TPC tick.
    pub fn tpc_tdc_to_tick(&self, tdc: f64) -> f64 {
        tdc - self.tpc_time().value() / self.clocks.tpc.tick_period().value()
    }

    /// Electronics time of `tick` on `clock`, with tick 0 located at
    /// `sample` of `frame`.
    #[inline]
    fn frame_located_time(clock: &ClockState, tick: f64, sample: i64, frame: i64) -> Microseconds {
        clock.time_at(sample, frame) + clock.time_of_tick(tick)
    }
}

/// Generate the conversions of subsystems whose tick 0 is located by an
/// explicit frame/sample pair.
macro_rules! frame_located_conversions {
    ($(
        $clock:ident, $name:literal {
            trig_time: $trig:ident,
            beam_time: $beam:ident,
            time: $time:ident,
            tdc: $tdc:ident,
            g4_tdc: $g4:ident $(,)?
        }
    )+) => {
        impl ClocksData {
            $(
                #[doc = concat!($name, " tick to trigger time; tick 0 sits at `sample` of `frame`.")]
                pub fn $trig(&self, tick: f64, sample: i64, frame: i64) -> Microseconds {
                    Self::frame_located_time(&self.clocks.$clock, tick, sample, frame)
                        - self.trigger_time
                }

                #[doc = concat!($name, " tick to beam-gate time; tick 0 sits at `sample` of `frame`.")]
                pub fn $beam(&self, tick: f64, sample: i64, frame: i64) -> Microseconds {
                    Self::frame_located_time(&self.clocks.$clock, tick, sample, frame)
                        - self.beam_gate_time
                }

                #[doc = concat!($name, " tick to electronics time; tick 0 sits at `sample` of `frame`.")]
                pub fn $time(&self, tick: f64, sample: i64, frame: i64) -> Microseconds {
                    Self::frame_located_time(&self.clocks.$clock, tick, sample, frame)
                }

                #[doc = concat!($name, " tick to ", $name, "-clock ticks from electronics start.")]
                pub fn $tdc(&self, tick: f64, sample: i64, frame: i64) -> f64 {
                    self.clocks.$clock.tick_of_fractional(tick, sample, frame)
                }

                #[doc = concat!("Simulation time to ", $name, "-clock ticks from electronics start.")]
                pub fn $g4(&self, g4_time: Nanoseconds) -> f64 {
                    self.g4_to_elec_time(g4_time).value() * self.clocks.$clock.frequency()
                }
            )+
        }
    };
}

frame_located_conversions! {
    optical, "Optical" {
        trig_time: optical_tick_to_trig_time,
        beam_time: optical_tick_to_beam_time,
        time: optical_tick_to_time,
        tdc: optical_tick_to_tdc,
        g4_tdc: optical_g4_time_to_tdc,
    }
    trigger, "Trigger" {
        trig_time: trigger_tick_to_trig_time,
        beam_time: trigger_tick_to_beam_time,
        time: trigger_tick_to_time,
        tdc: trigger_tick_to_tdc,
        g4_tdc: trigger_g4_time_to_tdc,
    }
    external, "External" {
        trig_time: external_tick_to_trig_time,
        beam_time: external_tick_to_beam_time,
        time: external_tick_to_time,
        tdc: external_tick_to_tdc,
        g4_tdc: external_g4_time_to_tdc,
    }
}

// ── Report ────────────────────────────────────────────────────────────────

impl std::fmt::Display for ClocksData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "G4 reference time:    {}", self.g4_ref_time)?;
        writeln!(
            f,
            "TPC trigger offset:   {} (configured {})",
            self.trigger_offset_tpc(),
            self.trigger_offset.raw()
        )?;
        writeln!(f, "Trigger time:         {}", self.trigger_time)?;
        writeln!(f, "Beam gate time:       {}", self.beam_gate_time)?;
        writeln!(f, "TPC start time:       {}", self.tpc_time())?;
        for id in ClockId::ALL {
            let clock = self.clock(id);
            writeln!(
                f,
                "{:<9} clock:      {} MHz, frame {} ({} ticks), time {}",
                id.name(),
                clock.frequency(),
                clock.frame_period(),
                clock.frame_ticks(),
                clock.time()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigKey;

    fn data(trigger_offset: f64) -> ClocksData {
        let config = ClocksConfig {
            g4_ref_time: 500_000.0,
            trigger_offset_tpc: trigger_offset,
            frame_period: 1_600.0,
            clock_speed_tpc: 2.0,
            clock_speed_optical: 64.0,
            clock_speed_trigger: 16.0,
            clock_speed_external: 31.25,
            default_trig_time: 0.0,
            default_beam_time: 0.0,
        };
        ClocksData::for_job(&config).unwrap()
    }

    #[test]
    fn trigger_offset_sign_selects_encoding() {
        assert_eq!(
            TriggerOffset::from_config(-1_600.0),
            TriggerOffset::Time(Microseconds::new(-1_600.0))
        );
        assert_eq!(TriggerOffset::from_config(3_200.0), TriggerOffset::Ticks(3_200.0));
        assert_eq!(TriggerOffset::from_config(0.0), TriggerOffset::Ticks(0.0));
        assert_eq!(TriggerOffset::from_config(3_200.0).raw(), 3_200.0);
    }

    #[test]
    fn both_encodings_give_the_same_offset() {
        let time_form = data(-1_600.0);
        let tick_form = data(3_200.0);
        assert_eq!(time_form.trigger_offset_tpc().value(), -1_600.0);
        assert_eq!(tick_form.trigger_offset_tpc().value(), -1_600.0);
        assert_eq!(time_form.tpc_time(), tick_form.tpc_time());
    }

    #[test]
    fn tpc_time_and_time_to_tick() {
        let d = data(-1_600.0);
        assert_eq!(d.tpc_time().value(), -1_600.0);
        assert_eq!(d.time_to_tick(Microseconds::new(0.0)), 3_200.0);
        assert_eq!(d.trigger_offset_ticks(), 3_200);
        assert!((d.sampling_rate().value() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn g4_to_elec_time_subtracts_reference() {
        let d = data(-1_600.0);
        assert_eq!(d.g4_ref_time().value(), 500.0);
        let elec = d.g4_to_elec_time(Nanoseconds::new(500_000.0));
        assert!(elec.value().abs() < 1e-9);
    }

    #[test]
    fn tpc_tick_family() {
        let d = data(-1_600.0).with_trigger(Microseconds::new(10.0), Microseconds::new(4.0));
        assert_eq!(d.tpc_time().value(), -1_590.0);
        assert_eq!(d.tpc_tick_to_time(4.0).value(), -1_588.0);
        assert_eq!(d.tpc_tick_to_trig_time(4.0).value(), -1_598.0);
        assert_eq!(d.tpc_tick_to_beam_time(4.0).value(), -1_592.0);
        assert_eq!(d.tpc_tick_to_tdc(4.0), -3_180.0 + 4.0);
        assert_eq!(d.tpc_tdc_to_tick(d.tpc_tick_to_tdc(4.0)), 4.0);
    }

    #[test]
    fn tpc_g4_conversions() {
        let d = data(-1_600.0);
        // simulation 501 us → electronics 1 us → 2 ticks from start, 3202 TPC ticks
        let g4 = Nanoseconds::new(501_000.0);
        assert!((d.tpc_g4_time_to_tdc(g4) - 2.0).abs() < 1e-6);
        assert!((d.tpc_g4_time_to_tick(g4) - 3_202.0).abs() < 1e-6);
    }

    #[test]
    fn optical_tick_to_tdc_adds_sample() {
        let d = data(-1_600.0);
        assert_eq!(d.optical_tick_to_tdc(10.0, 5, 0), 15.0);
        assert_eq!(d.optical_tick_to_tdc(10.0, 5, 1), 15.0 + 102_400.0);
    }

    #[test]
    fn tdc_of_far_frames_does_not_overflow() {
        let d = data(-1_600.0);
        let frame = i64::MAX / 1_000;
        let tdc = d.optical_tick_to_tdc(0.0, 0, frame);
        assert!(tdc.is_finite());
        assert!((tdc / (frame as f64 * 102_400.0) - 1.0).abs() < 1e-12);
        assert!(d.external_tick_to_tdc(0.0, 0, -frame) < 0.0);
    }

    #[test]
    fn frame_located_times() {
        let d = data(-1_600.0).with_trigger(Microseconds::new(100.0), Microseconds::new(90.0));
        // optical: sample 64 of frame 1 = 1 us + 1600 us; tick 32 = 0.5 us
        let t = d.optical_tick_to_time(32.0, 64, 1);
        assert!((t.value() - 1_601.5).abs() < 1e-9);
        assert!((d.optical_tick_to_trig_time(32.0, 64, 1).value() - 1_501.5).abs() < 1e-9);
        assert!((d.optical_tick_to_beam_time(32.0, 64, 1).value() - 1_511.5).abs() < 1e-9);

        let t = d.trigger_tick_to_time(16.0, 0, 0);
        assert!((t.value() - 1.0).abs() < 1e-12);
        assert_eq!(d.trigger_tick_to_tdc(16.0, 0, 2), 16.0 + 2.0 * 25_600.0);

        let t = d.external_tick_to_time(31.25, 0, 0);
        assert!((t.value() - 1.0).abs() < 1e-12);
        assert!((d.external_tick_to_trig_time(31.25, 0, 0).value() + 99.0).abs() < 1e-9);
        assert!((d.external_tick_to_beam_time(31.25, 0, 0).value() + 89.0).abs() < 1e-9);
        assert!((d.trigger_tick_to_trig_time(16.0, 0, 0).value() + 99.0).abs() < 1e-9);
        assert!((d.trigger_tick_to_beam_time(16.0, 0, 0).value() + 89.0).abs() < 1e-9);
        assert_eq!(d.external_tick_to_tdc(1.0, 3, 0), 4.0);
    }

    #[test]
    fn g4_to_subsystem_tdc() {
        let d = data(-1_600.0);
        let g4 = Nanoseconds::new(502_000.0);
        assert!((d.optical_g4_time_to_tdc(g4) - 128.0).abs() < 1e-6);
        assert!((d.trigger_g4_time_to_tdc(g4) - 32.0).abs() < 1e-6);
        assert!((d.external_g4_time_to_tdc(g4) - 62.5).abs() < 1e-6);
    }

    #[test]
    fn with_trigger_moves_clocks_and_keeps_configuration() {
        let d = data(-1_600.0);
        let e = d.with_trigger(Microseconds::new(7.0), Microseconds::new(3.0));
        assert_eq!(d.trigger_time().value(), 0.0);
        assert_eq!(e.trigger_time().value(), 7.0);
        assert_eq!(e.beam_gate_time().value(), 3.0);
        for id in ClockId::ALL {
            assert_eq!(e.clock(id).time().value(), 7.0);
            assert_eq!(e.clock(id).frequency(), d.clock(id).frequency());
        }
        assert_eq!(e.g4_ref_time(), d.g4_ref_time());
    }

    #[test]
    fn invalid_clock_names_the_clock() {
        let config = ClocksConfig::default().with(ConfigKey::ClockSpeedTrigger, 0.0);
        let err = ClocksData::for_job(&config).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidClock {
                clock: ClockId::Trigger,
                ..
            }
        ));
    }

    #[test]
    fn report_lists_every_clock() {
        let report = data(-1_600.0).to_string();
        for id in ClockId::ALL {
            assert!(report.contains(id.name()), "{report}");
        }
        assert!(report.contains("TPC start time"));
    }
}
