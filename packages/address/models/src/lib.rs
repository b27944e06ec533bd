#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the address tagger and normalizer.
//!
//! This crate contains only data types. It has no I/O and no knowledge of
//! abbreviation vocabularies; those live in `lead_cleaner_address`.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Semantic label attached to a span of a free-text address.
///
/// Names follow the USPS-derived labels used by common US address taggers
/// so that tagged output is recognizable to anyone who has used one.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ComponentLabel {
    /// House number (`"123"`, `"12B"`, `"1/2"`).
    AddressNumber,
    /// Directional before the street name (`"N"` in `"123 N Main St"`).
    StreetNamePreDirectional,
    /// The street name proper.
    StreetName,
    /// Street suffix (`"St"`, `"Ave"`).
    StreetNamePostType,
    /// Directional after the street suffix (`"NW"` in `"100 K St NW"`).
    StreetNamePostDirectional,
    /// Secondary unit designator (`"Apt"`, `"Ste"`).
    OccupancyType,
    /// Secondary unit identifier (`"4"`, `"#12"`).
    OccupancyIdentifier,
    /// PO Box designator (`"PO Box"`).
    #[strum(serialize = "USPSBoxType")]
    UspsBoxType,
    /// PO Box number.
    #[strum(serialize = "USPSBoxID")]
    UspsBoxId,
    /// City / place name.
    PlaceName,
    /// State or territory code.
    StateName,
    /// ZIP or ZIP+4.
    ZipCode,
}

/// A labeled span of the raw address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    /// Semantic label.
    pub label: ComponentLabel,
    /// Raw text covered by the label, words separated by single spaces.
    pub text: String,
}

impl AddressComponent {
    /// Creates a component from a label and its text.
    #[must_use]
    pub fn new(label: ComponentLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

/// What kind of address the tagger believes it saw.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum Classification {
    /// A deliverable street address.
    #[strum(serialize = "Street Address")]
    StreetAddress,
    /// A PO Box.
    #[strum(serialize = "PO Box")]
    PoBox,
    /// Anything else (intersections, landmarks, partial data).
    Ambiguous,
}

/// Why the tagger gave up on an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnparseableReason {
    /// The same label was assigned to two non-adjacent components.
    RepeatedLabel {
        /// The label that recurred.
        label: ComponentLabel,
    },
    /// Any other failure.
    Malformed {
        /// Human-readable description.
        message: String,
    },
}

impl std::fmt::Display for UnparseableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RepeatedLabel { label } => write!(f, "repeated label {label}"),
            Self::Malformed { message } => write!(f, "malformed address: {message}"),
        }
    }
}

/// Result of tagging one address.
///
/// Components are always an ordered sequence in input order so that
/// rebuilding an address from them is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagOutcome {
    /// The address was segmented.
    Parsed {
        /// Labeled components in input order.
        components: Vec<AddressComponent>,
        /// Overall classification.
        classification: Classification,
    },
    /// The tagger could not segment the address.
    Unparseable {
        /// Why tagging failed.
        reason: UnparseableReason,
    },
}

impl TagOutcome {
    /// Shorthand for a [`UnparseableReason::Malformed`] outcome.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Unparseable {
            reason: UnparseableReason::Malformed {
                message: message.into(),
            },
        }
    }

    /// Returns the text of the first component with `label`, if any.
    #[must_use]
    pub fn component(&self, label: ComponentLabel) -> Option<&str> {
        match self {
            Self::Parsed { components, .. } => components
                .iter()
                .find(|c| c.label == label)
                .map(|c| c.text.as_str()),
            Self::Unparseable { .. } => None,
        }
    }
}
