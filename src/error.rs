// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.
//!
//! Two layers:
//!
//! | Type | Raised by | Meaning |
//! |------|-----------|---------|
//! | [`ClockError`] | [`ClockState`](crate::ClockState) | one clock descriptor is unusable |
//! | [`Error`] | snapshot / service construction | configuration cannot produce a consistent snapshot |
//!
//! Category mismatches never show up here: they are rejected by the type
//! checker.

use crate::clock::ClockId;
use crate::config::ConfigKey;
use thiserror::Error;

/// Failure of a single [`ClockState`](crate::ClockState).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ClockError {
    /// Frequency is zero, negative, or not finite.
    #[error("clock frequency {frequency} MHz must be positive and finite")]
    NonPositiveFrequency { frequency: f64 },

    /// Frame period is zero, negative, or not finite.
    #[error("frame period {frame_period} us must be positive and finite")]
    InvalidFramePeriod { frame_period: f64 },

    /// The frame is shorter than one tick.
    #[error("frame period {frame_period} us holds no whole tick at {frequency} MHz")]
    EmptyFrame { frame_period: f64, frequency: f64 },

    /// A tick count does not fit the 64-bit integral tick representation.
    #[error("tick value {ticks} does not fit a 64-bit tick counter")]
    TickOutOfRange { ticks: f64 },
}

/// Failure to build a [`ClocksData`](crate::ClocksData) snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// One of the four subsystem clocks is invalid.
    #[error("invalid {clock} clock: {source}")]
    InvalidClock {
        clock: ClockId,
        #[source]
        source: ClockError,
    },

    /// A configuration value is outside its domain.
    #[error("invalid configuration value {key} = {value}: {reason}")]
    InvalidConfig {
        key: ConfigKey,
        value: f64,
        reason: &'static str,
    },

    /// A configuration key name is not recognised.
    #[error("unknown configuration key {0:?}")]
    UnknownKey(String),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps a [`ClockError`] with the identity of the failing clock.
    pub fn invalid_clock(clock: ClockId, source: ClockError) -> Self {
        Self::InvalidClock { clock, source }
    }
}
