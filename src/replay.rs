/*!
 * Decode runs over recorded event streams.
 *
 * An event log is JSON Lines: one serialized `CaptionEvent` per line, with
 * blank lines and `#` comments ignored. `DecodeRun` feeds events into a fresh
 * `CaptionEngine` and applies the caller's fault policy.
 */

use std::io::BufRead;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::engine::CaptionEngine;
use crate::errors::{AppError, DecodeError};
use crate::events::{CaptionEvent, CaptionEventSink};

/// What a decode run does with a decode fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPolicy {
    /// Stop the run and return the fault
    #[default]
    Abort,
    /// Log the fault, count it and keep going
    Skip,
}

impl std::fmt::Display for FaultPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Counters reported when a run finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Events fed, including skipped ones
    pub events: usize,
    /// Elements accumulated across all channels and services
    pub elements: usize,
    /// Events dropped under `FaultPolicy::Skip`
    pub skipped: usize,
}

/// One decode run: a fresh engine plus the fault policy applied to it
pub struct DecodeRun {
    engine: CaptionEngine,
    policy: FaultPolicy,
    events: usize,
    skipped: usize,
}

impl DecodeRun {
    pub fn new(policy: FaultPolicy) -> Self {
        DecodeRun {
            engine: CaptionEngine::new(),
            policy,
            events: 0,
            skipped: 0,
        }
    }

    pub fn feed(&mut self, event: &CaptionEvent) -> Result<(), DecodeError> {
        self.events += 1;
        match self.engine.on_event(event) {
            Ok(()) => Ok(()),
            Err(error) => match self.policy {
                FaultPolicy::Abort => Err(error),
                FaultPolicy::Skip => {
                    warn!("Skipping event {}: {}", self.events, error);
                    self.skipped += 1;
                    Ok(())
                }
            },
        }
    }

    pub fn feed_all<'a, I>(&mut self, events: I) -> Result<(), DecodeError>
    where
        I: IntoIterator<Item = &'a CaptionEvent>,
    {
        for event in events {
            self.feed(event)?;
        }
        Ok(())
    }

    pub fn finish(self) -> (RunSummary, CaptionEngine) {
        let summary = RunSummary {
            events: self.events,
            elements: self.engine.element_count(),
            skipped: self.skipped,
        };
        info!(
            "Decode run finished: {} events, {} elements, {} skipped",
            summary.events, summary.elements, summary.skipped
        );
        (summary, self.engine)
    }
}

/// Parses a JSON Lines event log
pub fn read_event_log<R: BufRead>(reader: R) -> Result<Vec<CaptionEvent>, AppError> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: CaptionEvent = serde_json::from_str(trimmed).map_err(|e| AppError::EventLog {
            line: index + 1,
            message: e.to_string(),
        })?;
        events.push(event);
    }

    debug!("Read {} events from event log", events.len());
    Ok(events)
}

/// Serializes events as a JSON Lines event log
pub fn write_event_log<W: std::io::Write>(mut writer: W, events: &[CaptionEvent]) -> Result<(), AppError> {
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
