#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address normalization for lead exports.
//!
//! Turns free-text street addresses like `"123 N Main St Apt 4"` into
//! expanded, human-readable form (`"123 North Main Street Apartment 4"`)
//! suitable for map imports and dialer lists.
//!
//! # Architecture
//!
//! - [`abbreviations`]: immutable directional, street type, and unit
//!   designator tables, shared via `Arc`.
//! - [`tagger`]: the [`AddressTagger`] seam plus the rule-based
//!   [`UsAddressTagger`].
//! - [`normalize`]: the two-tier normalizer (tagged components first,
//!   word-by-word expansion as a fallback). Never fails.
//! - [`cache`]: per-input memoization for columns with repeated values.
//!
//! # Usage
//!
//! ```rust
//! assert_eq!(
//!     lead_cleaner_address::normalize("456 S.W. Elm Blvd"),
//!     "456 Southwest Elm Boulevard"
//! );
//! assert_eq!(lead_cleaner_address::normalize("PO BOX 552"), "PO Box 552");
//! ```

pub mod abbreviations;
pub mod cache;
pub mod normalize;
pub mod tagger;

pub use abbreviations::{AbbreviationTable, AbbreviationTables};
pub use cache::CachedNormalizer;
pub use lead_cleaner_address_models::{
    AddressComponent, Classification, ComponentLabel, TagOutcome, UnparseableReason,
};
pub use normalize::{AddressNormalizer, normalize};
pub use tagger::{AddressTagger, UsAddressTagger};
