// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The snapshot record type, plus the text-level entry form produced by
//! record suppliers (importers, stored campaign files)
//!

use crate::TimelineError;
use chronoplay_core::{CalendarDate, Category, SnapshotId};
use serde::{Deserialize, Serialize};

/// One dated record on a timeline: an identity, the in-game date it captures,
/// the category of map layer it shows, and the image payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    id: SnapshotId,
    date: CalendarDate,
    category: Category,

    /// Path of the captured image (opaque to this crate)
    path: String,

    /// Path of the cached thumbnail, if one has been generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail: Option<String>,

    /// Date text recognised in the image at import time, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ocr_text: Option<String>,
}

/// A snapshot as handed over by a record supplier, all fields still text.
/// Parsed into a [`Snapshot`] by [`Snapshot::from_entry`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// The identity, if the supplier already has one; minted otherwise
    #[serde(default)]
    pub id: Option<String>,

    /// Date text in any form accepted by [`CalendarDate::parse`]
    pub date: String,

    /// Category label; unknown labels are tolerated and become custom
    pub category: String,

    pub path: String,

    #[serde(default)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub ocr_text: Option<String>,
}

impl Snapshot {
    /// Create a snapshot with a freshly minted identity
    pub fn new(date: CalendarDate, category: Category, path: impl ToString) -> Self {
        Self {
            id: SnapshotId::new(),
            date,
            category,
            path: path.to_string(),
            thumbnail: None,
            ocr_text: None,
        }
    }

    /// Parse a supplier entry.  The date text propagates parse and range
    /// errors; the category label never fails; a malformed supplied identity
    /// is an error, a missing one is minted.
    pub fn from_entry(entry: SnapshotEntry) -> Result<Self, TimelineError> {
        let id = match entry.id {
            Some(text) => SnapshotId::from(&text).map_err(|_| TimelineError::InvalidId(text))?,
            None => SnapshotId::new(),
        };
        Ok(Self {
            id,
            date: CalendarDate::parse(&entry.date)?,
            category: Category::from_label(&entry.category),
            path: entry.path,
            thumbnail: entry.thumbnail,
            ocr_text: entry.ocr_text,
        })
    }

    pub fn id(&self) -> SnapshotId {
        self.id
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    /// Set the cached thumbnail path
    pub fn set_thumbnail(&mut self, thumbnail: impl ToString) {
        self.thumbnail = Some(thumbnail.to_string());
    }

    pub fn ocr_text(&self) -> Option<&str> {
        self.ocr_text.as_deref()
    }

    /// Set the date text recognised at import time
    pub fn set_ocr_text(&mut self, text: impl ToString) {
        self.ocr_text = Some(text.to_string());
    }
}
