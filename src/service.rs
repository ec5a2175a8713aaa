// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Snapshot provider for a processing job.
//!
//! A [`ClockService`] validates the configuration once, then hands out
//! [`ClocksData`] snapshots without further checks: one for job-wide
//! defaults, and one per event built from that event's [`EventTiming`].
//! Snapshots are plain values; the service keeps no per-event state.

use crate::clocks_data::ClocksData;
use crate::config::ClocksConfig;
use crate::error::Result;
use qtty::Microseconds;
use tracing::{debug, info};

/// Trigger information recorded for one event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriggerRecord {
    /// Electronics time of the hardware trigger.
    pub trigger_time: Microseconds,
    /// Electronics time of the beam-gate opening.
    pub beam_gate_time: Microseconds,
}

impl TriggerRecord {
    pub const fn new(trigger_time: Microseconds, beam_gate_time: Microseconds) -> Self {
        Self {
            trigger_time,
            beam_gate_time,
        }
    }
}

/// Per-event inputs to a snapshot. Everything is optional.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EventTiming {
    pub trigger: Option<TriggerRecord>,
    /// Shift of the simulation origin recorded by the generator, subtracted
    /// from the configured reference time.
    pub g4_ref_correction: Option<Microseconds>,
}

impl EventTiming {
    pub fn with_trigger(mut self, trigger: TriggerRecord) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn with_g4_ref_correction(mut self, correction: Microseconds) -> Self {
        self.g4_ref_correction = Some(correction);
        self
    }
}

/// Validated configuration plus the job-default snapshot.
#[derive(Debug, Clone)]
pub struct ClockService {
    config: ClocksConfig,
    job: ClocksData,
}

impl ClockService {
    /// Validate `config` and build the job-default snapshot.
    pub fn new(config: ClocksConfig) -> Result<Self> {
        let job = ClocksData::for_job(&config)?;
        info!(
            tpc_mhz = config.clock_speed_tpc,
            optical_mhz = config.clock_speed_optical,
            trigger_mhz = config.clock_speed_trigger,
            external_mhz = config.clock_speed_external,
            frame_period_us = config.frame_period,
            "clock service configured"
        );
        Ok(Self { config, job })
    }

    #[inline]
    pub fn config(&self) -> &ClocksConfig {
        &self.config
    }

    /// Snapshot with the configured reference, trigger and beam-gate times.
    #[inline]
    pub fn data_for_job(&self) -> ClocksData {
        self.job
    }

    /// Snapshot with explicit reference, trigger and beam-gate times.
    pub fn data_for(
        &self,
        g4_ref_time: Microseconds,
        trigger_time: Microseconds,
        beam_gate_time: Microseconds,
    ) -> ClocksData {
        ClocksData::new(
            g4_ref_time,
            self.job.trigger_offset(),
            trigger_time,
            beam_gate_time,
            self.job.clocks().at_time(trigger_time),
        )
    }

    /// Snapshot for one event.
    ///
    /// A missing trigger record falls back to the configured default trigger
    /// and beam-gate times.
    pub fn data_for_event(&self, event: &EventTiming) -> ClocksData {
        let trigger = match event.trigger {
            Some(record) => record,
            None => {
                debug!("no trigger record for event, using configured defaults");
                TriggerRecord::new(self.job.trigger_time(), self.job.beam_gate_time())
            }
        };
        let g4_ref_time = match event.g4_ref_correction {
            Some(correction) => self.job.g4_ref_time() - correction,
            None => self.job.g4_ref_time(),
        };
        let data = self.data_for(g4_ref_time, trigger.trigger_time, trigger.beam_gate_time);
        debug!(
            g4_ref_time = g4_ref_time.value(),
            trigger_time = trigger.trigger_time.value(),
            beam_gate_time = trigger.beam_gate_time.value(),
            "event clock snapshot built"
        );
        data
    }
}
