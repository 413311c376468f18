// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The playback engine
//!
//! A small state machine that owns the current instant, the play/pause flag
//! and the advance rate, and resolves the active snapshot after every seek or
//! tick.  The engine is driven entirely by the caller: it spawns nothing,
//! blocks on nothing, and only moves time forward when `tick` is called with
//! an elapsed wall-clock duration.  Correctness depends only on the `dt`
//! values supplied, not on call cadence, so playback is deterministic under
//! test.
//!
//! The engine never mutates the timeline.  The owning campaign keeps the
//! [`Timeline`] aggregate and passes a shared reference into each engine
//! operation.
//!

use crate::{PlaybackSpeed, Snapshot, SpeedError, Timeline};
use chronoplay_core::{CalendarDate, CalendarMode, Category, DateError, DateInput, SnapshotId};
use log::{debug, trace};
use thiserror::Error;

/// Errors that can arise from engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// The configured speed could not be turned into an advance rate
    #[error(transparent)]
    Speed(#[from] SpeedError),

    /// A seek target did not parse or validate, or a tick would advance past
    /// the supported year range
    #[error(transparent)]
    Date(#[from] DateError),

    /// The tick duration is not a finite number of seconds
    #[error("tick duration `{0}` is not allowed")]
    InvalidTickDuration(f64),
}

/// The Chronoplay playback engine.  Created by attaching a timeline; paused
/// until told otherwise.
pub struct Engine {
    /// The current instant
    current: CalendarDate,

    /// Whether ticks advance time
    playing: bool,

    /// The calendar model time advances under
    mode: CalendarMode,

    /// The configured advance rate
    speed: PlaybackSpeed,

    /// The active category filter applied when resolving snapshots
    filter: Option<Category>,

    /// Whether resolution falls back to the latest snapshot at or before the
    /// current instant when there is no exact match
    prefer_latest_before: bool,

    /// Identity of the last snapshot resolution returned, so changes can be
    /// detected and logged
    last_resolved: Option<SnapshotId>,

    /// Invoked with the current date after every successful seek or tick.
    ///
    /// This is how a presentation layer refreshes its displayed state.
    on_time_update: Option<Box<dyn FnMut(CalendarDate)>>,
}

impl Engine {
    /// Attach a timeline: paused, positioned at the earliest snapshot's date,
    /// or at `fallback` if the timeline is empty
    pub fn attach(timeline: &Timeline, fallback: CalendarDate, mode: CalendarMode) -> Self {
        let current = timeline.first().map(|s| s.date()).unwrap_or(fallback);
        Self {
            current,
            playing: false,
            mode,
            speed: PlaybackSpeed::default(),
            filter: None,
            prefer_latest_before: true,
            last_resolved: None,
            on_time_update: None,
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_date(&self) -> CalendarDate {
        self.current
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn speed(&self) -> &PlaybackSpeed {
        &self.speed
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn category_filter(&self) -> Option<Category> {
        self.filter
    }

    /// Set the category filter used by snapshot resolution.  Takes effect on
    /// the next seek or tick.
    pub fn set_category_filter(&mut self, filter: Option<Category>) {
        self.filter = filter;
    }

    /// Whether resolution may fall back to the latest snapshot before the
    /// current instant (on by default)
    pub fn set_prefer_latest_before(&mut self, prefer: bool) {
        self.prefer_latest_before = prefer;
    }

    /// Register the time-update notification, invoked with the current date
    /// after every successful seek or tick
    pub fn set_on_time_update<F>(&mut self, callback: F)
    where
        F: FnMut(CalendarDate) + 'static,
    {
        self.on_time_update = Some(Box::new(callback));
    }

    /// Jump to a date, in either play state.  The target is resolved before
    /// anything is mutated, so a failed seek leaves the engine untouched.
    /// Returns the active snapshot at the new instant.
    pub fn seek<'t>(
        &mut self,
        timeline: &'t Timeline,
        input: impl Into<DateInput>,
    ) -> Result<Option<&'t Snapshot>, PlaybackError> {
        let date = CalendarDate::resolve(input)?;
        debug!("seek to {date}");
        Ok(self.commit(timeline, date))
    }

    /// Advance the current instant by `dt_seconds` of wall-clock time at the
    /// configured speed.  A no-op while paused.  An unrecognized speed unit,
    /// a non-finite duration or an advance past the supported year range
    /// fails this call only - the engine stays usable.
    pub fn tick<'t>(
        &mut self,
        timeline: &'t Timeline,
        dt_seconds: f64,
    ) -> Result<Option<&'t Snapshot>, PlaybackError> {
        if !self.playing {
            return Ok(None);
        }
        if !dt_seconds.is_finite() {
            return Err(PlaybackError::InvalidTickDuration(dt_seconds));
        }
        let rate = self.speed.rate_days_per_second(self.mode)?;
        let advance_days = rate * dt_seconds;
        // the saturating float-to-int cast is caught by from_ordinal's range check
        let new_ordinal =
            (self.current.to_ordinal(self.mode) as f64 + advance_days).round_ties_even() as i64;
        let date = CalendarDate::from_ordinal(new_ordinal, self.mode)?;
        trace!("tick {dt_seconds}s -> {advance_days} days -> {date}");
        Ok(self.commit(timeline, date))
    }

    /// Seek to the next snapshot strictly after the current instant, if there
    /// is one.  `category` narrows the search (independently of the active
    /// resolution filter).  With nothing ahead, the engine is left untouched.
    pub fn step_to_next_snapshot<'t>(
        &mut self,
        timeline: &'t Timeline,
        category: Option<Category>,
    ) -> Option<&'t Snapshot> {
        let next = timeline.earliest_after(self.current, category)?;
        let date = next.date();
        debug!("step to next snapshot {} at {date}", next.id());
        self.commit(timeline, date);
        Some(next)
    }

    /// Set the current instant, notify, and resolve the active snapshot
    fn commit<'t>(&mut self, timeline: &'t Timeline, date: CalendarDate) -> Option<&'t Snapshot> {
        self.current = date;
        if let Some(callback) = self.on_time_update.as_mut() {
            callback(date);
        }
        self.resolve(timeline)
    }

    /// The snapshot for the current instant: an exact match on date and
    /// filter, else (when enabled) the latest one before, else none
    fn resolve<'t>(&mut self, timeline: &'t Timeline) -> Option<&'t Snapshot> {
        let snapshot = timeline.find_exact(self.current, self.filter).or_else(|| {
            self.prefer_latest_before
                .then(|| timeline.latest_at_or_before(self.current, self.filter))
                .flatten()
        });

        let id = snapshot.map(Snapshot::id);
        if id != self.last_resolved {
            match &id {
                Some(id) => debug!("active snapshot changed to {id} at {}", self.current),
                None => debug!("no active snapshot at {}", self.current),
            }
            self.last_resolved = id;
        }
        snapshot
    }
}
