#![allow(clippy::too_many_lines)]
//! Directional, street type, and unit designator abbreviation tables.
//!
//! Each table maps an uppercase abbreviation to its canonical expanded
//! form. The three tables are consulted in a fixed order (directional,
//! street type, unit) so a token present in more than one table always
//! resolves the same way.
//!
//! `PL` expands to `Place`. Some lead exports carry `Pl` for Plaza-named
//! streets, but `PLZ` is the USPS abbreviation for Plaza and is mapped
//! separately.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

const DIRECTIONALS: &[(&str, &str)] = &[
    ("N", "North"),
    ("S", "South"),
    ("E", "East"),
    ("W", "West"),
    ("NE", "Northeast"),
    ("NW", "Northwest"),
    ("SE", "Southeast"),
    ("SW", "Southwest"),
    ("NORTH", "North"),
    ("SOUTH", "South"),
    ("EAST", "East"),
    ("WEST", "West"),
    ("NORTHEAST", "Northeast"),
    ("NORTHWEST", "Northwest"),
    ("SOUTHEAST", "Southeast"),
    ("SOUTHWEST", "Southwest"),
];

/// USPS Publication 28 suffixes plus a handful of non-standard forms
/// (`BTW`, `TRFY`, `CON`, `RDGE`) seen in lead exports.
const STREET_TYPES: &[(&str, &str)] = &[
    ("ST", "Street"),
    ("AVE", "Avenue"),
    ("BLVD", "Boulevard"),
    ("RD", "Road"),
    ("LN", "Lane"),
    ("DR", "Drive"),
    ("CT", "Court"),
    ("PL", "Place"),
    ("SQ", "Square"),
    ("TER", "Terrace"),
    ("CIR", "Circle"),
    ("PKWY", "Parkway"),
    ("TRL", "Trail"),
    ("TRCE", "Trace"),
    ("HWY", "Highway"),
    ("CTR", "Center"),
    ("SPG", "Spring"),
    ("LK", "Lake"),
    ("ALY", "Alley"),
    ("BND", "Bend"),
    ("BRG", "Bridge"),
    ("BYU", "Bayou"),
    ("CLF", "Cliff"),
    ("COR", "Corner"),
    ("CV", "Cove"),
    ("CRK", "Creek"),
    ("XING", "Crossing"),
    ("GDN", "Garden"),
    ("GLN", "Glen"),
    ("GRN", "Green"),
    ("HBR", "Harbor"),
    ("HOLW", "Hollow"),
    ("IS", "Island"),
    ("JCT", "Junction"),
    ("KNL", "Knoll"),
    ("MDWS", "Meadows"),
    ("MTN", "Mountain"),
    ("PASS", "Pass"),
    ("PT", "Point"),
    ("RNCH", "Ranch"),
    ("SHRS", "Shores"),
    ("STA", "Station"),
    ("VLY", "Valley"),
    ("VW", "View"),
    ("WLK", "Walk"),
    ("ANX", "Annex"),
    ("ARC", "Arcade"),
    ("AV", "Avenue"),
    ("BCH", "Beach"),
    ("BG", "Burg"),
    ("BGS", "Burgs"),
    ("BLF", "Bluff"),
    ("BLFS", "Bluffs"),
    ("BOT", "Bottom"),
    ("BR", "Branch"),
    ("BRK", "Brook"),
    ("BRKS", "Brooks"),
    ("BTW", "Between"),
    ("CMN", "Common"),
    ("CMP", "Camp"),
    ("CNYN", "Canyon"),
    ("CPE", "Cape"),
    ("CSWY", "Causeway"),
    ("CLB", "Club"),
    ("CON", "Corner"),
    ("CORS", "Corners"),
    ("CP", "Camp"),
    ("CRES", "Crescent"),
    ("CRST", "Crest"),
    ("XRD", "Crossroad"),
    ("EXT", "Extension"),
    ("FALLS", "Falls"),
    ("FRK", "Fork"),
    ("FRKS", "Forks"),
    ("FT", "Fort"),
    ("FWY", "Freeway"),
    ("GDNS", "Gardens"),
    ("GTWAY", "Gateway"),
    ("HGHTS", "Heights"),
    ("HVN", "Haven"),
    ("HD", "Head"),
    ("HLLS", "Hills"),
    ("INLT", "Inlet"),
    ("JCTS", "Junctions"),
    ("KY", "Key"),
    ("KYS", "Keys"),
    ("LNDG", "Landing"),
    ("LGT", "Light"),
    ("LGTS", "Lights"),
    ("LF", "Loaf"),
    ("MNR", "Manor"),
    ("MLS", "Mills"),
    ("MSSN", "Mission"),
    ("MT", "Mount"),
    ("NCK", "Neck"),
    ("ORCH", "Orchard"),
    ("OVAL", "Oval"),
    ("PRK", "Park"),
    ("PKWYS", "Parkways"),
    ("PLN", "Plain"),
    ("PLZ", "Plaza"),
    ("PRT", "Port"),
    ("PR", "Prairie"),
    ("RAD", "Radial"),
    ("RDG", "Ridge"),
    ("RIV", "River"),
    ("RDGE", "Ridge"),
    ("RUN", "Run"),
    ("SHL", "Shoal"),
    ("SHLS", "Shoals"),
    ("SKWY", "Skyway"),
    ("SPGS", "Springs"),
    ("SPUR", "Spur"),
    ("STRM", "Stream"),
    ("STM", "Stream"),
    ("TRFY", "Terrace"),
    ("TRWY", "Throughway"),
    ("TPKE", "Turnpike"),
    ("UN", "Union"),
    ("VLG", "Village"),
    ("VIS", "Vista"),
    ("WAY", "Way"),
    ("EXPY", "Expressway"),
    ("FRWY", "Freeway"),
    ("TUNL", "Tunnel"),
];

const UNIT_TYPES: &[(&str, &str)] = &[
    ("APT", "Apartment"),
    ("STE", "Suite"),
    ("BLDG", "Building"),
    ("UNIT", "Unit"),
    ("RM", "Room"),
    ("FL", "Floor"),
    ("DEP", "Department"),
    ("OFC", "Office"),
    ("SP", "Space"),
    ("LOT", "Lot"),
    ("TRLR", "Trailer"),
    ("HANGAR", "Hangar"),
    ("SLIP", "Slip"),
    ("PIER", "Pier"),
    ("DOCK", "Dock"),
];

static STANDARD: LazyLock<Arc<AbbreviationTables>> =
    LazyLock::new(|| Arc::new(AbbreviationTables::usps()));

/// An immutable mapping from uppercase abbreviation to expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTable {
    entries: BTreeMap<String, String>,
}

impl AbbreviationTable {
    /// Builds a table from `(abbreviation, expansion)` pairs.
    ///
    /// Keys are uppercased so lookups with an uppercased token always hit
    /// regardless of how the pairs were written.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_uppercase(), v.into()))
                .collect(),
        }
    }

    /// Returns the expansion for an uppercase token, if present.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Expands `token` or returns it unchanged.
    #[must_use]
    pub fn expand<'a>(&'a self, token: &'a str) -> &'a str {
        self.get(token).unwrap_or(token)
    }

    /// Returns `true` if the uppercase token is a key or the uppercased
    /// form of one of the expansions.
    #[must_use]
    pub fn recognizes(&self, token: &str) -> bool {
        self.entries.contains_key(token)
            || self
                .entries
                .values()
                .any(|canonical| canonical.eq_ignore_ascii_case(token))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(abbreviation, expansion)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The three abbreviation tables in lookup precedence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTables {
    /// Compass directions.
    pub directional: AbbreviationTable,
    /// Street suffixes.
    pub street_type: AbbreviationTable,
    /// Secondary unit designators.
    pub unit_type: AbbreviationTable,
}

impl AbbreviationTables {
    /// Builds the standard vocabulary.
    #[must_use]
    pub fn usps() -> Self {
        Self {
            directional: AbbreviationTable::from_pairs(DIRECTIONALS.iter().copied()),
            street_type: AbbreviationTable::from_pairs(STREET_TYPES.iter().copied()),
            unit_type: AbbreviationTable::from_pairs(UNIT_TYPES.iter().copied()),
        }
    }

    /// Shared handle to the standard vocabulary, built on first use.
    #[must_use]
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    /// Looks up an uppercase token across all three tables.
    ///
    /// Directional wins over street type, which wins over unit type.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.directional
            .get(token)
            .or_else(|| self.street_type.get(token))
            .or_else(|| self.unit_type.get(token))
    }

    /// Returns `true` if the token is a directional abbreviation or name.
    #[must_use]
    pub fn is_directional(&self, token: &str) -> bool {
        self.directional.recognizes(token)
    }

    /// Returns `true` if the token is a street type abbreviation or name.
    #[must_use]
    pub fn is_street_type(&self, token: &str) -> bool {
        self.street_type.recognizes(token)
    }

    /// Returns `true` if the token is a unit designator or its name.
    #[must_use]
    pub fn is_unit_type(&self, token: &str) -> bool {
        self.unit_type.recognizes(token)
    }
}

/// Reduces a word to its lookup key: ASCII punctuation removed, uppercased.
///
/// `"S.W."` becomes `"SW"` and `"Apt,"` becomes `"APT"`.
#[must_use]
pub fn lookup_key(word: &str) -> String {
    word.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_uppercase)
        .collect()
}
