// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Readout clocks.
//!
//! A [`ClockState`] models one hardware clock: a tick frequency, a frame
//! length, and a current time. It maps between the clock's continuous time
//! axis and its discrete tick / sample / frame representation, and knows
//! nothing about any other clock.
//!
//! ```text
//!            frame 0                 frame 1
//!   |s0|s1|s2| … |sN-1|  |s0|s1|s2| … |sN-1|
//!   ^ tick 0              ^ tick N = frame_ticks
//! ```
//!
//! # Discretisation
//!
//! Integral ticks, samples and frames are obtained by truncating toward the
//! clock's own zero, so times before the origin give frame 0 and a negative
//! sample rather than the previous frame. A fractional count within a few
//! ulps of an integer is taken as that integer first: `n / f * f` may land
//! just below `n` when `f` is not a power of two. Integral counters are
//! 64-bit; a value that does not fit saturates at the `i64` bounds (NaN maps
//! to 0). Callers that need to detect this use [`ClockState::try_ticks_at`]
//! and [`ClockState::try_tick_of`].

use crate::error::ClockError;
use qtty::Microseconds;

/// Ulps of slack, relative to `scale`, inside which a count snaps to the
/// nearest integer.
const SNAP_ULPS: f64 = 8.0;

/// Truncate a fractional count toward zero, snapping to the nearest integer
/// when within rounding distance of it.
///
/// `scale` is the magnitude of the largest operand the count was computed
/// from; rounding error grows with it.
#[inline]
pub(crate) fn truncate_count(count: f64, scale: f64) -> f64 {
    let nearest = count.round();
    if (count - nearest).abs() <= SNAP_ULPS * f64::EPSILON * scale.abs().max(1.0) {
        nearest
    } else {
        count.trunc()
    }
}

/// Identity of one of the four subsystem clocks of a detector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClockId {
    /// Time projection chamber readout clock.
    Tpc,
    /// Optical detector readout clock.
    Optical,
    /// Trigger hardware clock.
    Trigger,
    /// External clock.
    External,
}

impl ClockId {
    /// All clocks, in snapshot order.
    pub const ALL: [ClockId; 4] = [
        ClockId::Tpc,
        ClockId::Optical,
        ClockId::Trigger,
        ClockId::External,
    ];

    /// Lowercase name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            ClockId::Tpc => "TPC",
            ClockId::Optical => "optical",
            ClockId::Trigger => "trigger",
            ClockId::External => "external",
        }
    }
}

impl std::fmt::Display for ClockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// State of one electronics clock.
///
/// Frequency and frame period are fixed at construction; only the current
/// time may change, either in place ([`set_time`](Self::set_time)) or by
/// building a new value ([`with_time`](Self::with_time)).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockState {
    time: Microseconds,
    frame_period: Microseconds,
    frequency: f64,
    frame_ticks: i64,
}

impl ClockState {
    /// Create a clock reading `time`, with frames of `frame_period` and a
    /// tick frequency of `frequency` MHz.
    pub fn new(
        time: Microseconds,
        frame_period: Microseconds,
        frequency: f64,
    ) -> Result<Self, ClockError> {
        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(ClockError::NonPositiveFrequency { frequency });
        }
        let period = frame_period.value();
        if !(period.is_finite() && period > 0.0) {
            return Err(ClockError::InvalidFramePeriod {
                frame_period: period,
            });
        }
        let frame_ticks = (period * frequency).floor();
        if frame_ticks < 1.0 {
            return Err(ClockError::EmptyFrame {
                frame_period: period,
                frequency,
            });
        }
        if frame_ticks >= i64::MAX as f64 {
            return Err(ClockError::TickOutOfRange { ticks: frame_ticks });
        }
        Ok(Self {
            time,
            frame_period,
            frequency,
            frame_ticks: frame_ticks as i64,
        })
    }

    // ── fixed properties ──────────────────────────────────────────────

    /// Tick frequency in MHz (ticks per microsecond).
    #[inline]
    pub const fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Length of one frame.
    #[inline]
    pub const fn frame_period(&self) -> Microseconds {
        self.frame_period
    }

    /// Length of one tick.
    #[inline]
    pub fn tick_period(&self) -> Microseconds {
        Microseconds::new(1.0 / self.frequency)
    }

    /// Whole ticks in one frame.
    #[inline]
    pub const fn frame_ticks(&self) -> i64 {
        self.frame_ticks
    }

    // ── current time ──────────────────────────────────────────────────

    /// Current time of the clock.
    #[inline]
    pub const fn time(&self) -> Microseconds {
        self.time
    }

    /// Tick containing the current time.
    #[inline]
    pub fn ticks(&self) -> i64 {
        self.ticks_at(self.time)
    }

    /// Sample within the current frame.
    #[inline]
    pub fn sample(&self) -> i64 {
        self.sample_at(self.time)
    }

    /// Current frame.
    #[inline]
    pub fn frame(&self) -> i64 {
        self.frame_at(self.time)
    }

    /// Move the clock to `time`.
    #[inline]
    pub fn set_time(&mut self, time: Microseconds) {
        self.time = time;
    }

    /// Move the clock to the start of `sample` in `frame`.
    #[inline]
    pub fn set_time_at(&mut self, sample: i64, frame: i64) {
        self.time = self.time_at(sample, frame);
    }

    /// Move the clock to the start of `tick`.
    #[inline]
    pub fn set_time_at_tick(&mut self, tick: i64) {
        self.time = self.time_of_tick(tick as f64);
    }

    /// A copy of this clock reading `time`.
    #[inline]
    pub fn with_time(&self, time: Microseconds) -> Self {
        Self { time, ..*self }
    }

    /// A copy of this clock reading the start of `tick`.
    #[inline]
    pub fn with_tick(&self, tick: i64) -> Self {
        self.with_time(self.time_of_tick(tick as f64))
    }

    /// A copy of this clock advanced by `dt`.
    #[inline]
    pub fn advanced_by(&self, dt: Microseconds) -> Self {
        self.with_time(self.time + dt)
    }

    /// A copy of this clock advanced by `ticks` tick periods.
    #[inline]
    pub fn advanced_by_ticks(&self, ticks: i64) -> Self {
        self.advanced_by(self.time_of_tick(ticks as f64))
    }

    // ── time ↔ tick ───────────────────────────────────────────────────

    /// Time at the start of `sample` in `frame`.
    #[inline]
    pub fn time_at(&self, sample: i64, frame: i64) -> Microseconds {
        Microseconds::new(
            sample as f64 / self.frequency + frame as f64 * self.frame_period.value(),
        )
    }

    /// Time at the start of `tick` (fractional ticks allowed).
    #[inline]
    pub fn time_of_tick(&self, tick: f64) -> Microseconds {
        Microseconds::new(tick / self.frequency)
    }

    /// Tick containing `time`, truncated toward zero.
    #[inline]
    pub fn ticks_at(&self, time: Microseconds) -> i64 {
        let ticks = self.ticks_fractional_at(time);
        truncate_count(ticks, ticks) as i64
    }

    /// Fractional tick count at `time`.
    #[inline]
    pub fn ticks_fractional_at(&self, time: Microseconds) -> f64 {
        time.value() * self.frequency
    }

    /// Tick containing `time`, or an error if it does not fit an `i64`.
    pub fn try_ticks_at(&self, time: Microseconds) -> Result<i64, ClockError> {
        let ticks = self.ticks_fractional_at(time);
        let ticks = truncate_count(ticks, ticks);
        // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
        if ticks.is_finite() && ticks >= i64::MIN as f64 && ticks < i64::MAX as f64 {
            Ok(ticks as i64)
        } else {
            Err(ClockError::TickOutOfRange { ticks })
        }
    }

    /// Tick of `sample` in `frame`, saturating at the `i64` bounds.
    #[inline]
    pub fn tick_of(&self, sample: i64, frame: i64) -> i64 {
        frame.saturating_mul(self.frame_ticks).saturating_add(sample)
    }

    /// Tick of `sample` in `frame`, or an error if it does not fit an `i64`.
    pub fn try_tick_of(&self, sample: i64, frame: i64) -> Result<i64, ClockError> {
        frame
            .checked_mul(self.frame_ticks)
            .and_then(|start| start.checked_add(sample))
            .ok_or(ClockError::TickOutOfRange {
                ticks: self.tick_of_fractional(0.0, sample, frame),
            })
    }

    /// Tick of `sample` in `frame` plus `tick`, in floating point.
    #[inline]
    pub fn tick_of_fractional(&self, tick: f64, sample: i64, frame: i64) -> f64 {
        sample as f64 + frame as f64 * self.frame_ticks as f64 + tick
    }

    // ── sample / frame ────────────────────────────────────────────────

    /// Frame containing `time`, truncated toward zero.
    ///
    /// Negative times up to one frame before the origin are in frame 0.
    #[inline]
    pub fn frame_at(&self, time: Microseconds) -> i64 {
        let frames = time.value() / self.frame_period.value();
        truncate_count(frames, frames) as i64
    }

    /// Sample of `time` within its frame, truncated toward zero.
    ///
    /// Follows [`frame_at`](Self::frame_at): a negative time gives a
    /// negative sample, e.g. `-2` for `-1 µs` at 2 MHz.
    #[inline]
    pub fn sample_at(&self, time: Microseconds) -> i64 {
        let frame_start = self.frame_at(time) as f64 * self.frame_period.value();
        let samples = (time.value() - frame_start) * self.frequency;
        truncate_count(samples, time.value() * self.frequency) as i64
    }

    /// Sample of `tick` within its frame.
    #[inline]
    pub fn sample_of_tick(&self, tick: i64) -> i64 {
        tick % self.frame_ticks
    }

    /// Frame containing `tick`.
    #[inline]
    pub fn frame_of_tick(&self, tick: i64) -> i64 {
        tick / self.frame_ticks
    }
}
