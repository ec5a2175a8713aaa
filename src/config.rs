// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Clock configuration.
//!
//! [`ClocksConfig`] carries the fixed set of numeric parameters a
//! [`ClocksData`](crate::ClocksData) snapshot is built from. The values are
//! stored as raw numbers in the units the configuration is written in; the
//! typed accessors attach units.
//!
//! | Key | Unit | Meaning |
//! |-----|------|---------|
//! | `G4RefTime` | ns | simulation time at which electronics counting starts |
//! | `TriggerOffsetTPC` | µs or TPC ticks | TPC readout start relative to trigger, see [`TriggerOffset`] |
//! | `FramePeriod` | µs | frame length shared by all clocks |
//! | `ClockSpeedTPC` | MHz | TPC clock |
//! | `ClockSpeedOptical` | MHz | optical clock |
//! | `ClockSpeedTrigger` | MHz | trigger clock |
//! | `ClockSpeedExternal` | MHz | external clock |
//! | `DefaultTrigTime` | µs | trigger time when an event has none |
//! | `DefaultBeamTime` | µs | beam-gate time when an event has none |
//!
//! With the `serde` feature the struct (de)serialises with exactly these
//! key names; every key is required and unknown keys are rejected.

use crate::clock::ClockId;
use crate::clocks_data::TriggerOffset;
use crate::error::{Error, Result};
use qtty::{Microseconds, Nanoseconds};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of one configuration value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    G4RefTime,
    TriggerOffsetTPC,
    FramePeriod,
    ClockSpeedTPC,
    ClockSpeedOptical,
    ClockSpeedTrigger,
    ClockSpeedExternal,
    DefaultTrigTime,
    DefaultBeamTime,
}

impl ConfigKey {
    /// Every key, in configuration order.
    pub const ALL: [ConfigKey; 9] = [
        ConfigKey::G4RefTime,
        ConfigKey::TriggerOffsetTPC,
        ConfigKey::FramePeriod,
        ConfigKey::ClockSpeedTPC,
        ConfigKey::ClockSpeedOptical,
        ConfigKey::ClockSpeedTrigger,
        ConfigKey::ClockSpeedExternal,
        ConfigKey::DefaultTrigTime,
        ConfigKey::DefaultBeamTime,
    ];

    /// Key name as written in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            ConfigKey::G4RefTime => "G4RefTime",
            ConfigKey::TriggerOffsetTPC => "TriggerOffsetTPC",
            ConfigKey::FramePeriod => "FramePeriod",
            ConfigKey::ClockSpeedTPC => "ClockSpeedTPC",
            ConfigKey::ClockSpeedOptical => "ClockSpeedOptical",
            ConfigKey::ClockSpeedTrigger => "ClockSpeedTrigger",
            ConfigKey::ClockSpeedExternal => "ClockSpeedExternal",
            ConfigKey::DefaultTrigTime => "DefaultTrigTime",
            ConfigKey::DefaultBeamTime => "DefaultBeamTime",
        }
    }

    /// The clock-speed key of `clock`.
    pub const fn clock_speed(clock: ClockId) -> Self {
        match clock {
            ClockId::Tpc => ConfigKey::ClockSpeedTPC,
            ClockId::Optical => ConfigKey::ClockSpeedOptical,
            ClockId::Trigger => ConfigKey::ClockSpeedTrigger,
            ClockId::External => ConfigKey::ClockSpeedExternal,
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| Error::UnknownKey(s.to_string()))
    }
}

/// Raw clock configuration values.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ClocksConfig {
    /// Simulation time of the electronics start, in ns.
    #[cfg_attr(feature = "serde", serde(rename = "G4RefTime"))]
    pub g4_ref_time: f64,

    /// TPC readout start: µs before trigger if negative, TPC ticks otherwise.
    #[cfg_attr(feature = "serde", serde(rename = "TriggerOffsetTPC"))]
    pub trigger_offset_tpc: f64,

    /// Frame length, in µs.
    #[cfg_attr(feature = "serde", serde(rename = "FramePeriod"))]
    pub frame_period: f64,

    /// TPC clock speed, in MHz.
    #[cfg_attr(feature = "serde", serde(rename = "ClockSpeedTPC"))]
    pub clock_speed_tpc: f64,

    /// Optical clock speed, in MHz.
    #[cfg_attr(feature = "serde", serde(rename = "ClockSpeedOptical"))]
    pub clock_speed_optical: f64,

    /// Trigger clock speed, in MHz.
    #[cfg_attr(feature = "serde", serde(rename = "ClockSpeedTrigger"))]
    pub clock_speed_trigger: f64,

    /// External clock speed, in MHz.
    #[cfg_attr(feature = "serde", serde(rename = "ClockSpeedExternal"))]
    pub clock_speed_external: f64,

    /// Trigger time used when an event carries none, in µs.
    #[cfg_attr(feature = "serde", serde(rename = "DefaultTrigTime"))]
    pub default_trig_time: f64,

    /// Beam-gate time used when an event carries none, in µs.
    #[cfg_attr(feature = "serde", serde(rename = "DefaultBeamTime"))]
    pub default_beam_time: f64,
}

impl Default for ClocksConfig {
    /// A 2 MHz TPC / 64 MHz optical / 16 MHz trigger / 31.25 MHz external
    /// setup with 1.6 ms frames, the TPC readout opening one frame before
    /// the trigger.
    fn default() -> Self {
        Self {
            g4_ref_time: -4_050e3,
            trigger_offset_tpc: -1_600.0,
            frame_period: 1_600.0,
            clock_speed_tpc: 2.0,
            clock_speed_optical: 64.0,
            clock_speed_trigger: 16.0,
            clock_speed_external: 31.25,
            default_trig_time: 4_050.0,
            default_beam_time: 4_050.0,
        }
    }
}

impl ClocksConfig {
    /// Raw value of `key`.
    pub fn get(&self, key: ConfigKey) -> f64 {
        match key {
            ConfigKey::G4RefTime => self.g4_ref_time,
            ConfigKey::TriggerOffsetTPC => self.trigger_offset_tpc,
            ConfigKey::FramePeriod => self.frame_period,
            ConfigKey::ClockSpeedTPC => self.clock_speed_tpc,
            ConfigKey::ClockSpeedOptical => self.clock_speed_optical,
            ConfigKey::ClockSpeedTrigger => self.clock_speed_trigger,
            ConfigKey::ClockSpeedExternal => self.clock_speed_external,
            ConfigKey::DefaultTrigTime => self.default_trig_time,
            ConfigKey::DefaultBeamTime => self.default_beam_time,
        }
    }

    /// Overwrite the raw value of `key`.
    pub fn set(&mut self, key: ConfigKey, value: f64) {
        let slot = match key {
            ConfigKey::G4RefTime => &mut self.g4_ref_time,
            ConfigKey::TriggerOffsetTPC => &mut self.trigger_offset_tpc,
            ConfigKey::FramePeriod => &mut self.frame_period,
            ConfigKey::ClockSpeedTPC => &mut self.clock_speed_tpc,
            ConfigKey::ClockSpeedOptical => &mut self.clock_speed_optical,
            ConfigKey::ClockSpeedTrigger => &mut self.clock_speed_trigger,
            ConfigKey::ClockSpeedExternal => &mut self.clock_speed_external,
            ConfigKey::DefaultTrigTime => &mut self.default_trig_time,
            ConfigKey::DefaultBeamTime => &mut self.default_beam_time,
        };
        *slot = value;
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: ConfigKey, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// `(key, value)` pairs in configuration order.
    pub fn entries(&self) -> impl Iterator<Item = (ConfigKey, f64)> + '_ {
        ConfigKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Check the values that are not validated by clock construction.
    ///
    /// Clock speeds are checked when the clocks are built, so the error can
    /// name the failing clock. The frame period is shared by every clock and
    /// is reported here by key.
    pub fn validate(&self) -> Result<()> {
        if !(self.frame_period.is_finite() && self.frame_period > 0.0) {
            return Err(Error::InvalidConfig {
                key: ConfigKey::FramePeriod,
                value: self.frame_period,
                reason: "must be positive and finite",
            });
        }
        for key in [
            ConfigKey::G4RefTime,
            ConfigKey::TriggerOffsetTPC,
            ConfigKey::DefaultTrigTime,
            ConfigKey::DefaultBeamTime,
        ] {
            let value = self.get(key);
            if !value.is_finite() {
                return Err(Error::InvalidConfig {
                    key,
                    value,
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }

    // ── typed accessors ───────────────────────────────────────────────

    /// Simulation time of the electronics start.
    pub fn g4_ref_time(&self) -> Nanoseconds {
        Nanoseconds::new(self.g4_ref_time)
    }

    /// The TPC trigger offset with its encoding resolved.
    pub fn trigger_offset(&self) -> TriggerOffset {
        TriggerOffset::from_config(self.trigger_offset_tpc)
    }

    /// Frame length.
    pub fn frame_period(&self) -> Microseconds {
        Microseconds::new(self.frame_period)
    }

    /// Speed of `clock`, in MHz.
    pub fn clock_speed(&self, clock: ClockId) -> f64 {
        self.get(ConfigKey::clock_speed(clock))
    }

    /// Default trigger time.
    pub fn default_trigger_time(&self) -> Microseconds {
        Microseconds::new(self.default_trig_time)
    }

    /// Default beam-gate time.
    pub fn default_beam_gate_time(&self) -> Microseconds {
        Microseconds::new(self.default_beam_time)
    }
}
