// SPDX-License-Identifier: MIT

//!
//! The closed set of snapshot categories
//!
//! Snapshots are tagged with the map layer they capture.  Record suppliers
//! hand categories over as free text; labels outside the closed set are
//! coerced to [`Category::Custom`] rather than rejected.
//!

use log::warn;
use serde::{Deserialize, Serialize};

/// What a snapshot depicts
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(derive_more::Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Political/realm borders
    #[display("realms")]
    Realms,

    /// Religious spread
    #[display("faith")]
    Faith,

    /// Cultural spread
    #[display("culture")]
    Culture,

    /// Anything else
    #[display("custom")]
    Custom,
}

impl Category {
    /// Map a supplier's category label onto the closed set.  Unknown labels
    /// become [`Category::Custom`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "realms" => Self::Realms,
            "faith" => Self::Faith,
            "culture" => Self::Culture,
            "custom" => Self::Custom,
            other => {
                warn!("unknown snapshot category `{other}`, treating as custom");
                Self::Custom
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_label() {
        assert_eq!(Category::from_label("realms"), Category::Realms);
        assert_eq!(Category::from_label(" Faith "), Category::Faith);
        assert_eq!(Category::from_label("CULTURE"), Category::Culture);
        assert_eq!(Category::from_label("trade-routes"), Category::Custom);
        assert_eq!(Category::from_label(""), Category::Custom);
    }

    #[test]
    fn serde() {
        assert_eq!(serde_json::to_string(&Category::Realms).unwrap(), r#""realms""#);
        assert_eq!(
            serde_json::from_str::<Category>(r#""faith""#).unwrap(),
            Category::Faith
        );
    }

    #[test]
    fn display() {
        assert_eq!(Category::Culture.to_string(), "culture");
    }
}
