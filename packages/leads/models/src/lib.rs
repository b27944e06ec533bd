#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the lead cleaner.
//!
//! This crate contains the column vocabulary of lead exports, the set of
//! cleaning options (output shapes), export formats, and the
//! configuration struct. It has no heavyweight dependencies and does no
//! I/O beyond reading a config file.

pub mod columns;

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Embedded default configuration.
const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// One of the fixed output shapes a lead export can be cleaned into.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CleaningOption {
    /// Map import: address + homeowner / net worth / income.
    AddressHoNwIncome,
    /// Map import with the mobile phone appended when dialing is allowed.
    AddressHoNwIncomePhone,
    /// Names with a SHA-256 email hash.
    Sha256,
    /// Full export with a combined one-line address.
    FullCombinedAddress,
    /// Phone and credit rating with address details.
    PhoneCreditScore,
    /// One file per state.
    SplitByState,
    /// One file per ZIP code.
    SplitByZip,
    /// Names and formatted phones, do-not-call rows removed.
    DialerList,
    /// All columns, one row per distinct lead, with a duplicate count.
    Deduplicated,
}

impl CleaningOption {
    /// Every option, in menu order.
    pub const ALL: &[Self] = &[
        Self::AddressHoNwIncome,
        Self::AddressHoNwIncomePhone,
        Self::Sha256,
        Self::FullCombinedAddress,
        Self::PhoneCreditScore,
        Self::SplitByState,
        Self::SplitByZip,
        Self::DialerList,
        Self::Deduplicated,
    ];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddressHoNwIncome => "Address + HoNWIncome",
            Self::AddressHoNwIncomePhone => "Address + HoNWIncome & Phone",
            Self::Sha256 => "Sha256",
            Self::FullCombinedAddress => "Full Combined Address",
            Self::PhoneCreditScore => "Phone & Credit Score",
            Self::SplitByState => "Split by State",
            Self::SplitByZip => "Split by ZIP",
            Self::DialerList => "Dialer List",
            Self::Deduplicated => "Deduplicated",
        }
    }

    /// One-sentence description shown after selection.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AddressHoNwIncome => {
                "Combines cleaned address with homeowner status, net worth, and income range."
            }
            Self::AddressHoNwIncomePhone => {
                "Adds phone number to the combined data if not marked as Do Not Call (DNC)."
            }
            Self::Sha256 => "Provides names with hashed email data, preferring personal email hash.",
            Self::FullCombinedAddress => {
                "Generates a comprehensive dataset with full address and additional metadata."
            }
            Self::PhoneCreditScore => {
                "Focuses on phone numbers and credit scores with address details."
            }
            Self::SplitByState => {
                "Splits the dataset into one file per state based on the PERSONAL_STATE column."
            }
            Self::SplitByZip => {
                "Splits the dataset into one file per 5-digit ZIP based on the PERSONAL_ZIP column."
            }
            Self::DialerList => {
                "Names with formatted phone numbers, excluding Do Not Call rows and unusable numbers."
            }
            Self::Deduplicated => {
                "Keeps one row per distinct lead and records how many times it appeared."
            }
        }
    }

    /// Columns that must all be present.
    #[must_use]
    pub const fn required_columns(self) -> &'static [&'static str] {
        use columns::{
            DNC, FIRST_NAME, LAST_NAME, MOBILE_PHONE, PERSONAL_ADDRESS, PERSONAL_CITY,
            PERSONAL_STATE, PERSONAL_ZIP,
        };
        match self {
            Self::AddressHoNwIncome => &[PERSONAL_ADDRESS, PERSONAL_CITY],
            Self::AddressHoNwIncomePhone => &[PERSONAL_ADDRESS, PERSONAL_CITY, MOBILE_PHONE, DNC],
            Self::Sha256 | Self::DialerList => &[FIRST_NAME, LAST_NAME],
            Self::FullCombinedAddress | Self::PhoneCreditScore => &[
                FIRST_NAME,
                LAST_NAME,
                PERSONAL_ADDRESS,
                PERSONAL_CITY,
                PERSONAL_STATE,
                PERSONAL_ZIP,
            ],
            Self::SplitByState => &[PERSONAL_ADDRESS, PERSONAL_CITY, PERSONAL_STATE],
            Self::SplitByZip => &[PERSONAL_ADDRESS, PERSONAL_ZIP],
            Self::Deduplicated => &[PERSONAL_ADDRESS],
        }
    }

    /// Columns of which at least one must be present (empty = no
    /// constraint).
    #[must_use]
    pub const fn any_of_columns(self) -> &'static [&'static str] {
        use columns::{
            BUSINESS_EMAIL, DIRECT_NUMBER, MOBILE_PHONE, PERSONAL_EMAIL, SHA256_BUSINESS_EMAIL,
            SHA256_PERSONAL_EMAIL,
        };
        match self {
            Self::Sha256 => &[
                SHA256_PERSONAL_EMAIL,
                SHA256_BUSINESS_EMAIL,
                PERSONAL_EMAIL,
                BUSINESS_EMAIL,
            ],
            Self::PhoneCreditScore | Self::DialerList => &[MOBILE_PHONE, DIRECT_NUMBER],
            _ => &[],
        }
    }

    /// Whether rows are filtered on, and cleaned from, `PERSONAL_ADDRESS`.
    #[must_use]
    pub const fn cleans_addresses(self) -> bool {
        !matches!(self, Self::Sha256 | Self::DialerList)
    }

    /// Whether the output is split into files of at most `batch_size`
    /// rows.
    #[must_use]
    pub const fn is_batched(self) -> bool {
        matches!(
            self,
            Self::AddressHoNwIncome | Self::AddressHoNwIncomePhone | Self::DialerList
        )
    }

    /// Column the output is grouped by (one file per distinct value).
    #[must_use]
    pub const fn group_column(self) -> Option<&'static str> {
        match self {
            Self::SplitByState => Some(columns::PERSONAL_STATE),
            Self::SplitByZip => Some(columns::PERSONAL_ZIP),
            _ => None,
        }
    }

    /// Whether the output is meant for a Google My Maps import.
    #[must_use]
    pub const fn is_map_import(self) -> bool {
        matches!(
            self,
            Self::AddressHoNwIncome | Self::AddressHoNwIncomePhone | Self::SplitByState
        )
    }

    /// File name stem: the label lowercased with spaces replaced by `_`.
    /// `+` and `&` are kept.
    #[must_use]
    pub fn slug(self) -> String {
        self.label().to_lowercase().replace(' ', "_")
    }
}

/// File format of the written outputs.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// A JSON array of objects keyed by column name.
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`CleanerConfig`].
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime settings for a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Maximum rows per file for batched options.
    pub batch_size: usize,
    /// Output format.
    pub format: ExportFormat,
    /// Bundle multiple outputs into `all_files.zip`.
    pub zip_when_multiple: bool,
    /// Directory outputs are written to.
    pub output_dir: String,
    /// Extra columns that, with the cleaned address, identify a lead.
    pub dedupe_key: Vec<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            batch_size: 2000,
            format: ExportFormat::Csv,
            zip_when_multiple: true,
            output_dir: ".".to_string(),
            dedupe_key: vec![
                columns::PERSONAL_CITY.to_string(),
                columns::PERSONAL_STATE.to_string(),
            ],
        }
    }
}

impl CleanerConfig {
    /// The embedded default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded default config: {e}"))
    }

    /// Parses a config; keys missing from `s` take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `s` is not valid config TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(s)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&contents)
    }
}
