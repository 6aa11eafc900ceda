//! # Time ranges
//!
//! Walk slots are half-open intervals `[start, end)` on the shelter's local
//! wall clock. All ordering and "is it in the past" rules used by the stores
//! live here so that slot creation, slot updates and reservation claims agree
//! on what counts as the past.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{WalkError, WalkResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    /// Builds a range, rejecting empty or inverted intervals.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> WalkResult<Self> {
        if start >= end {
            return Err(WalkError::Validation(format!(
                "Start time {} must be before end time {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// For ranges read back from storage, where `start < end` is already
    /// guaranteed by a check constraint.
    pub(crate) fn from_trusted(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Fails if the range starts strictly before `now`.
    pub fn ensure_not_in_past(&self, now: NaiveDateTime) -> WalkResult<()> {
        if self.start < now {
            return Err(WalkError::Validation(format!(
                "Start time {} is in the past",
                self.start
            )));
        }
        Ok(())
    }

    pub fn has_ended(&self, now: NaiveDateTime) -> bool {
        self.end <= now
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Touching ranges (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}
