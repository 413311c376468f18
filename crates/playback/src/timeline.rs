// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The timeline aggregate: a campaign's snapshots, kept sorted by
//! real-calendar ordinal, with the lookups playback needs
//!
//! Dates always order by their **real** ordinal here, whatever calendar model
//! the engine plays back under; lexicographic date order is the same under
//! both models, so this is an implementation detail rather than a behavioural
//! one.
//!

use crate::{Snapshot, SnapshotEntry};
use chronoplay_core::{CalendarDate, CalendarMode, Category, DateError, SnapshotId};
use thiserror::Error;

/// Errors that can arise in relation to a [`Timeline`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// A snapshot with this identity is already on the timeline
    #[error("snapshot `{0}` already exists")]
    DuplicateId(SnapshotId),

    /// A record supplier handed over an identity that is not a valid ID
    #[error("`{0}` is not a valid snapshot identity")]
    InvalidId(String),

    /// A record supplier handed over date text that did not parse or
    /// validate
    #[error(transparent)]
    Date(#[from] DateError),
}

/// A campaign's snapshots.  Invariants: sorted ascending by real-calendar
/// ordinal, stable among equal ordinals (insertion order preserved), and no
/// two snapshots share an identity.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from record-supplier entries.  Any malformed entry
    /// fails the whole build.
    pub fn from_entries(
        entries: impl IntoIterator<Item = SnapshotEntry>,
    ) -> Result<Self, TimelineError> {
        let mut timeline = Self::new();
        for entry in entries {
            timeline.insert(Snapshot::from_entry(entry)?)?;
        }
        Ok(timeline)
    }

    /// Insert a snapshot, keeping the ordinal sort.  New snapshots go after
    /// any existing snapshot with the same ordinal, so insertion order is the
    /// tie order.
    pub fn insert(&mut self, snapshot: Snapshot) -> Result<(), TimelineError> {
        if self.snapshots.iter().any(|s| s.id() == snapshot.id()) {
            return Err(TimelineError::DuplicateId(snapshot.id()));
        }
        let ord = ordinal(&snapshot.date());
        let pos = self.snapshots.partition_point(|s| ordinal(&s.date()) <= ord);
        self.snapshots.insert(pos, snapshot);
        Ok(())
    }

    /// The first snapshot in sorted order whose date equals `date` (and whose
    /// category matches, if one is given)
    pub fn find_exact(&self, date: CalendarDate, category: Option<Category>) -> Option<&Snapshot> {
        self.snapshots
            .iter()
            .find(|s| s.date() == date && matches_category(s, category))
    }

    /// Among matching snapshots dated at or before `date`, the one with the
    /// greatest ordinal.  Ties go to the lowest position in the sorted
    /// sequence (the strict `>` below never replaces an equal candidate).
    pub fn latest_at_or_before(
        &self,
        date: CalendarDate,
        category: Option<Category>,
    ) -> Option<&Snapshot> {
        let target = ordinal(&date);
        let mut best: Option<&Snapshot> = None;
        for snapshot in &self.snapshots {
            if ordinal(&snapshot.date()) > target || !matches_category(snapshot, category) {
                continue;
            }
            match best {
                Some(b) if ordinal(&snapshot.date()) > ordinal(&b.date()) => {
                    best = Some(snapshot);
                }
                None => best = Some(snapshot),
                _ => {}
            }
        }
        best
    }

    /// Among matching snapshots dated strictly after `date`, the one with the
    /// smallest ordinal.  Same tie-break as [`Timeline::latest_at_or_before`].
    pub fn earliest_after(
        &self,
        date: CalendarDate,
        category: Option<Category>,
    ) -> Option<&Snapshot> {
        let target = ordinal(&date);
        self.snapshots
            .iter()
            .find(|s| ordinal(&s.date()) > target && matches_category(s, category))
    }

    /// The earliest snapshot, if any
    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    /// Look a snapshot up by identity
    pub fn get(&self, id: SnapshotId) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Iterate the snapshots in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}

impl<'de> serde::Deserialize<'de> for Timeline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let snapshots = Vec::<Snapshot>::deserialize(deserializer)?;
        let mut timeline = Timeline::new();
        for snapshot in snapshots {
            timeline.insert(snapshot).map_err(serde::de::Error::custom)?;
        }
        Ok(timeline)
    }
}

fn ordinal(date: &CalendarDate) -> i64 {
    date.to_ordinal(CalendarMode::Real)
}

fn matches_category(snapshot: &Snapshot, category: Option<Category>) -> bool {
    category.is_none_or(|c| snapshot.category() == c)
}

#[cfg(test)]
mod test {
    use super::*;

    fn snapshot(date: &str, category: Category, path: &str) -> Snapshot {
        Snapshot::new(CalendarDate::parse(date).unwrap(), category, path)
    }

    fn timeline(snapshots: impl IntoIterator<Item = Snapshot>) -> Timeline {
        let mut timeline = Timeline::new();
        for s in snapshots {
            timeline.insert(s).unwrap();
        }
        timeline
    }

    #[test]
    fn insert_keeps_sorted() {
        let tl = timeline([
            snapshot("1445-06-01", Category::Realms, "b"),
            snapshot("1444-01-01", Category::Realms, "a"),
            snapshot("-100-03-15", Category::Realms, "bce"),
        ]);
        let paths: Vec<&str> = tl.iter().map(|s| s.path()).collect();
        assert_eq!(paths, ["bce", "a", "b"]);
        assert_eq!(tl.first().unwrap().path(), "bce");
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let s = snapshot("1444-01-01", Category::Realms, "a");
        let dup = s.clone();
        let mut tl = timeline([s]);
        assert!(matches!(
            tl.insert(dup),
            Err(TimelineError::DuplicateId(_))
        ));
        assert_eq!(tl.len(), 1);
    }

    #[test]
    fn find_exact_respects_category() {
        let tl = timeline([
            snapshot("1444-01-01", Category::Realms, "realms"),
            snapshot("1444-01-01", Category::Faith, "faith"),
        ]);
        let date = CalendarDate::parse("1444-01-01").unwrap();
        assert_eq!(
            tl.find_exact(date, Some(Category::Faith)).unwrap().path(),
            "faith"
        );
        assert_eq!(tl.find_exact(date, None).unwrap().path(), "realms");
        assert!(tl.find_exact(date, Some(Category::Culture)).is_none());
        assert!(tl
            .find_exact(CalendarDate::parse("1444-01-02").unwrap(), None)
            .is_none());
    }

    #[test]
    fn latest_at_or_before() {
        let tl = timeline([
            snapshot("1444-01-01", Category::Realms, "a"),
            snapshot("1445-06-01", Category::Realms, "b"),
            snapshot("1450-01-01", Category::Faith, "faith"),
        ]);
        let at = |text: &str| CalendarDate::parse(text).unwrap();

        assert_eq!(tl.latest_at_or_before(at("1445-06-01"), None).unwrap().path(), "b");
        assert_eq!(tl.latest_at_or_before(at("1449-12-31"), None).unwrap().path(), "b");
        assert_eq!(
            tl.latest_at_or_before(at("1460"), Some(Category::Realms))
                .unwrap()
                .path(),
            "b"
        );
        assert!(tl.latest_at_or_before(at("1443-12-31"), None).is_none());
    }

    #[test]
    fn equal_ordinal_ties_are_first_inserted() {
        let tl = timeline([
            snapshot("1444-01-01", Category::Realms, "first"),
            snapshot("1444-01-01", Category::Realms, "second"),
            snapshot("1450-01-01", Category::Realms, "later-first"),
            snapshot("1450-01-01", Category::Realms, "later-second"),
        ]);
        let at = |text: &str| CalendarDate::parse(text).unwrap();

        assert_eq!(
            tl.latest_at_or_before(at("1444-06-01"), None).unwrap().path(),
            "first"
        );
        assert_eq!(
            tl.earliest_after(at("1444-06-01"), None).unwrap().path(),
            "later-first"
        );
    }

    #[test]
    fn earliest_after() {
        let tl = timeline([
            snapshot("1444-01-01", Category::Realms, "a"),
            snapshot("1445-06-01", Category::Faith, "faith"),
            snapshot("1450-01-01", Category::Realms, "b"),
        ]);
        let at = |text: &str| CalendarDate::parse(text).unwrap();

        assert_eq!(tl.earliest_after(at("1444-01-01"), None).unwrap().path(), "faith");
        assert_eq!(
            tl.earliest_after(at("1444-01-01"), Some(Category::Realms))
                .unwrap()
                .path(),
            "b"
        );
        assert!(tl.earliest_after(at("1450-01-01"), None).is_none());
    }

    #[test]
    fn from_entries() {
        let entries = vec![
            SnapshotEntry {
                id: None,
                date: "1445.6.1".to_string(),
                category: "realms".to_string(),
                path: "b".to_string(),
                thumbnail: None,
                ocr_text: None,
            },
            SnapshotEntry {
                id: None,
                date: "1444".to_string(),
                category: "weird-layer".to_string(),
                path: "a".to_string(),
                thumbnail: None,
                ocr_text: None,
            },
        ];
        let tl = Timeline::from_entries(entries).unwrap();
        assert_eq!(tl.len(), 2);
        assert_eq!(tl.first().unwrap().path(), "a");
        assert_eq!(tl.first().unwrap().category(), Category::Custom);
    }

    #[test]
    fn serde_round_trip_rebuilds_invariants() {
        let tl = timeline([
            snapshot("1445-06-01", Category::Realms, "b"),
            snapshot("1444-01-01", Category::Faith, "a"),
        ]);
        let json = serde_json::to_string(&tl).unwrap();
        let restored: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tl);
        let id = tl.first().unwrap().id();
        assert_eq!(restored.get(id).unwrap().path(), "a");

        // a duplicated identity in stored data is rejected on load
        let with_dup = {
            let mut snapshots: Vec<Snapshot> = tl.iter().cloned().collect();
            snapshots.push(snapshots[0].clone());
            serde_json::to_string(&snapshots).unwrap()
        };
        assert!(serde_json::from_str::<Timeline>(&with_dup).is_err());
    }

    #[test]
    fn from_entries_propagates_date_errors() {
        let entries = vec![SnapshotEntry {
            id: None,
            date: "867-13-01".to_string(),
            category: "realms".to_string(),
            path: "a".to_string(),
            thumbnail: None,
            ocr_text: None,
        }];
        assert!(matches!(
            Timeline::from_entries(entries),
            Err(TimelineError::Date(DateError::InvalidMonth(13)))
        ));
    }
}
