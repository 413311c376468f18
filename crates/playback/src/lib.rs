// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Chronoplay project*
//!
//! This library crate holds the timeline aggregate and the playback engine
//! for the Chronoplay project.  It does the following:
//!
//! - Keeps a campaign's snapshots ordered by real-calendar ordinal, with
//! deterministic exact/latest-before/earliest-after lookups over them
//! - Ingests snapshot entries from record suppliers (text dates, free-text
//! category labels, opaque payload paths)
//! - Drives playback: a current instant, play/pause, a configurable advance
//! rate in days, months or years per second, and resolution of the active
//! snapshot after every seek or tick
//!
//! This crate makes use of the basic Chronoplay `core` crate for primitive
//! types, and is itself used by whatever shell (GUI, TUI, scripting) embeds
//! the player.
//!

mod engine;
mod snapshot;
mod speed;
mod timeline;

pub use engine::*;
pub use snapshot::*;
pub use speed::*;
pub use timeline::*;
