// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Chronoplay project*
//!
//! This crate defines the basic datatypes used across the Chronoplay project:
//! calendar-agnostic dates over wide-range (including BCE) years, the two
//! calendar models (real proleptic-Gregorian and fixed-365-day no-leap),
//! snapshot identities and the closed category set.
//!
//! This crate is designed to be used by the rest of the Chronoplay project
//! (the playback crate, and any shell built on top of it), as well as by 3rd
//! party projects that want to interoperate with Chronoplay data.
//!
//! This crate aims to provide APIs for each type so that if a type is
//! instantiated, the developer can be sure it's valid.
//!

mod category;
mod date;
mod id;
pub mod ordinal;

pub use category::*;
pub use date::*;
pub use id::*;
