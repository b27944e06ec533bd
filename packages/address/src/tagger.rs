//! Address tagging: segmenting a free-text address into labeled parts.
//!
//! The normalizer only depends on the [`AddressTagger`] trait, so any
//! segmenter (a statistical model, a remote service, a test stub) can be
//! plugged in. [`UsAddressTagger`] is the rule-based implementation used
//! by default. It understands the shapes that dominate US lead exports:
//!
//! - Street lines: `"123 N Main St Apt 4"`, `"100 K St NW, Washington, DC 20001"`
//! - PO Boxes: `"PO BOX 552"`, `"P.O. Box 12"`, `"Post Office Box 9"`
//!
//! Anything else comes back as [`TagOutcome::Unparseable`].

use std::sync::{Arc, LazyLock};

use lead_cleaner_address_models::{
    AddressComponent, Classification, ComponentLabel, TagOutcome, UnparseableReason,
};
use regex::Regex;

use crate::abbreviations::{AbbreviationTables, lookup_key};

/// Matches the PO Box designator at the start of a segment and captures
/// the designator text and the box identifier.
static PO_BOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(P\.?\s*O\.?\s*B(?:OX|\.)?|POST\s+OFFICE\s+BOX)\s*#?\s*([A-Za-z0-9-]*\d[A-Za-z0-9-]*)\s*$",
    )
    .expect("valid regex")
});

/// House numbers: `123`, `12B`, `1/2`, `123-125`. `N123` is not accepted.
static ADDRESS_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d[\dA-Za-z/-]*$").expect("valid regex"));

/// Five-digit ZIP or ZIP+4.
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(?:-\d{4})?$").expect("valid regex"));

/// US state and territory postal codes.
const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY", "PR", "GU", "VI", "AS", "MP",
];

/// Segments a raw address into labeled components.
///
/// Implementations must be `Send + Sync` so one tagger can serve every
/// row of a table from any thread.
pub trait AddressTagger: Send + Sync {
    /// Tags `raw`. Must not panic on any input.
    fn tag(&self, raw: &str) -> TagOutcome;
}

impl<T: AddressTagger + ?Sized> AddressTagger for Arc<T> {
    fn tag(&self, raw: &str) -> TagOutcome {
        (**self).tag(raw)
    }
}

/// Rule-based tagger for US street addresses and PO Boxes.
#[derive(Debug, Clone)]
pub struct UsAddressTagger {
    tables: Arc<AbbreviationTables>,
}

impl Default for UsAddressTagger {
    fn default() -> Self {
        Self::new(AbbreviationTables::standard())
    }
}

impl UsAddressTagger {
    /// Creates a tagger that classifies words using `tables`.
    #[must_use]
    pub const fn new(tables: Arc<AbbreviationTables>) -> Self {
        Self { tables }
    }

    fn is_unit_designator(&self, word: &str) -> bool {
        word.starts_with('#') || self.tables.is_unit_type(&lookup_key(word))
    }

    fn is_directional(&self, word: &str) -> bool {
        self.tables.is_directional(&lookup_key(word))
    }

    fn is_street_type(&self, word: &str) -> bool {
        self.tables.is_street_type(&lookup_key(word))
    }

    /// Labels the tokens of the first comma segment of a street address.
    fn label_street_line<'a>(
        &self,
        words: &[&'a str],
        out: &mut Vec<(ComponentLabel, &'a str)>,
    ) -> Result<(), String> {
        let Some((&number, rest)) = words.split_first() else {
            return Err("empty street line".to_string());
        };
        if !ADDRESS_NUMBER_RE.is_match(number.trim_end_matches(['.', ','])) {
            return Err(format!("no house number in front of '{number}'"));
        }
        out.push((ComponentLabel::AddressNumber, number));

        // A unit designator only counts once at least one street word has
        // been seen, so "12 Pier Ave" keeps "Pier" as the street name.
        let unit_at = rest
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, w)| self.is_unit_designator(w))
            .map_or(rest.len(), |(i, _)| i);
        let (street, unit) = rest.split_at(unit_at);

        if street.is_empty() {
            return Err("no street name".to_string());
        }
        self.label_street(street, out);
        self.label_unit(unit, out);
        Ok(())
    }

    fn label_street<'a>(&self, words: &[&'a str], out: &mut Vec<(ComponentLabel, &'a str)>) {
        let mut start = 0;
        let mut end = words.len();

        let pre = (end - start > 1 && self.is_directional(words[start])).then(|| {
            start += 1;
            words[start - 1]
        });
        let post_dir = (end - start > 1 && self.is_directional(words[end - 1])).then(|| {
            end -= 1;
            words[end]
        });
        let post_type = (end - start > 1 && self.is_street_type(words[end - 1])).then(|| {
            end -= 1;
            words[end]
        });

        if let Some(word) = pre {
            out.push((ComponentLabel::StreetNamePreDirectional, word));
        }
        let mut previous_was_type = false;
        for &word in &words[start..end] {
            // "123 Main St 456 Elm Ave": a house number straight after a
            // suffix starts a second address.
            let label = if previous_was_type && ADDRESS_NUMBER_RE.is_match(word) {
                ComponentLabel::AddressNumber
            } else {
                ComponentLabel::StreetName
            };
            previous_was_type = self.is_street_type(word);
            out.push((label, word));
        }
        if let Some(word) = post_type {
            out.push((ComponentLabel::StreetNamePostType, word));
        }
        if let Some(word) = post_dir {
            out.push((ComponentLabel::StreetNamePostDirectional, word));
        }
    }

    fn label_unit<'a>(&self, words: &[&'a str], out: &mut Vec<(ComponentLabel, &'a str)>) {
        for &word in words {
            let label = if word.starts_with('#') {
                ComponentLabel::OccupancyIdentifier
            } else if self.is_unit_designator(word) {
                ComponentLabel::OccupancyType
            } else {
                ComponentLabel::OccupancyIdentifier
            };
            out.push((label, word));
        }
    }

    /// Labels a trailing comma segment (`"Springfield"`, `"IL 62701"`,
    /// `"Apt 4"`).
    fn label_locality<'a>(&self, words: &[&'a str], out: &mut Vec<(ComponentLabel, &'a str)>) {
        if words.first().is_some_and(|w| self.is_unit_designator(w)) {
            self.label_unit(words, out);
            return;
        }

        let mut end = words.len();
        let zip = (end > 0 && ZIP_RE.is_match(words[end - 1])).then(|| {
            end -= 1;
            words[end]
        });
        let state = (end > 0 && is_state_code(words[end - 1])).then(|| {
            end -= 1;
            words[end]
        });

        for &word in &words[..end] {
            out.push((ComponentLabel::PlaceName, word));
        }
        if let Some(word) = state {
            out.push((ComponentLabel::StateName, word));
        }
        if let Some(word) = zip {
            out.push((ComponentLabel::ZipCode, word));
        }
    }
}

impl AddressTagger for UsAddressTagger {
    fn tag(&self, raw: &str) -> TagOutcome {
        let segments: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let Some((&first, rest)) = segments.split_first() else {
            return TagOutcome::malformed("empty address");
        };

        let mut labeled: Vec<(ComponentLabel, &str)> = Vec::new();

        let classification = if let Some(caps) = PO_BOX_RE.captures(first) {
            if let (Some(kind), Some(id)) = (caps.get(1), caps.get(2)) {
                labeled.push((ComponentLabel::UspsBoxType, kind.as_str()));
                labeled.push((ComponentLabel::UspsBoxId, id.as_str()));
            }
            Classification::PoBox
        } else {
            let words: Vec<&str> = first.split_whitespace().collect();
            if let Err(message) = self.label_street_line(&words, &mut labeled) {
                return TagOutcome::malformed(message);
            }
            Classification::StreetAddress
        };

        for segment in rest {
            let words: Vec<&str> = segment.split_whitespace().collect();
            self.label_locality(&words, &mut labeled);
        }

        match merge_labels(&labeled) {
            Ok(components) => TagOutcome::Parsed {
                components,
                classification,
            },
            Err(label) => TagOutcome::Unparseable {
                reason: UnparseableReason::RepeatedLabel { label },
            },
        }
    }
}

fn is_state_code(word: &str) -> bool {
    word.len() == 2 && STATE_CODES.contains(&word.to_uppercase().as_str())
}

/// Collapses runs of identically labeled words into components.
///
/// Returns the offending label if any label appears in two non-adjacent
/// runs.
fn merge_labels(labeled: &[(ComponentLabel, &str)]) -> Result<Vec<AddressComponent>, ComponentLabel> {
    let mut components: Vec<AddressComponent> = Vec::new();

    for &(label, word) in labeled {
        match components.last_mut() {
            Some(last) if last.label == label => {
                last.text.push(' ');
                last.text.push_str(word);
            }
            _ => {
                if components.iter().any(|c| c.label == label) {
                    return Err(label);
                }
                components.push(AddressComponent::new(label, word));
            }
        }
    }

    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> (Vec<(ComponentLabel, String)>, Classification) {
        match UsAddressTagger::default().tag(raw) {
            TagOutcome::Parsed {
                components,
                classification,
            } => (
                components.into_iter().map(|c| (c.label, c.text)).collect(),
                classification,
            ),
            TagOutcome::Unparseable { reason } => panic!("'{raw}' failed to tag: {reason}"),
        }
    }

    fn pairs(items: &[(ComponentLabel, &str)]) -> Vec<(ComponentLabel, String)> {
        items.iter().map(|(l, t)| (*l, (*t).to_string())).collect()
    }

    #[test]
    fn tags_full_street_address() {
        let (components, classification) = parsed("123 N Main St Apt 4");
        assert_eq!(classification, Classification::StreetAddress);
        assert_eq!(
            components,
            pairs(&[
                (ComponentLabel::AddressNumber, "123"),
                (ComponentLabel::StreetNamePreDirectional, "N"),
                (ComponentLabel::StreetName, "Main"),
                (ComponentLabel::StreetNamePostType, "St"),
                (ComponentLabel::OccupancyType, "Apt"),
                (ComponentLabel::OccupancyIdentifier, "4"),
            ])
        );
    }

    #[test]
    fn tags_post_directional_and_locality() {
        let (components, _) = parsed("100 K St NW, Washington, DC 20001");
        assert_eq!(
            components,
            pairs(&[
                (ComponentLabel::AddressNumber, "100"),
                (ComponentLabel::StreetName, "K"),
                (ComponentLabel::StreetNamePostType, "St"),
                (ComponentLabel::StreetNamePostDirectional, "NW"),
                (ComponentLabel::PlaceName, "Washington"),
                (ComponentLabel::StateName, "DC"),
                (ComponentLabel::ZipCode, "20001"),
            ])
        );
    }

    #[test]
    fn keeps_multi_word_street_names_together() {
        let (components, _) = parsed("77 Martin Luther King Jr Blvd");
        assert_eq!(
            components[1],
            (ComponentLabel::StreetName, "Martin Luther King Jr".to_string())
        );
        assert_eq!(
            components[2],
            (ComponentLabel::StreetNamePostType, "Blvd".to_string())
        );
    }

    #[test]
    fn lone_directional_is_the_street_name() {
        let (components, _) = parsed("9 North");
        assert_eq!(
            components,
            pairs(&[
                (ComponentLabel::AddressNumber, "9"),
                (ComponentLabel::StreetName, "North"),
            ])
        );
    }

    #[test]
    fn unit_word_in_street_position_stays_street_name() {
        let (components, _) = parsed("12 Pier Ave");
        assert_eq!(
            components,
            pairs(&[
                (ComponentLabel::AddressNumber, "12"),
                (ComponentLabel::StreetName, "Pier"),
                (ComponentLabel::StreetNamePostType, "Ave"),
            ])
        );
    }

    #[test]
    fn hash_unit_identifier() {
        let (components, _) = parsed("5 Elm St #12");
        assert_eq!(
            components.last(),
            Some(&(ComponentLabel::OccupancyIdentifier, "#12".to_string()))
        );
    }

    #[test]
    fn unit_in_its_own_segment() {
        let (components, _) = parsed("5 Elm St, Ste 200, Austin, TX");
        assert!(components.contains(&(ComponentLabel::OccupancyType, "Ste".to_string())));
        assert!(components.contains(&(ComponentLabel::OccupancyIdentifier, "200".to_string())));
        assert!(components.contains(&(ComponentLabel::PlaceName, "Austin".to_string())));
        assert!(components.contains(&(ComponentLabel::StateName, "TX".to_string())));
    }

    #[test]
    fn tags_po_box_variants() {
        for raw in ["PO BOX 552", "P.O. Box 552", "po box #552", "Post Office Box 552", "POB 552"] {
            let (components, classification) = parsed(raw);
            assert_eq!(classification, Classification::PoBox, "{raw}");
            assert_eq!(
                components.iter().find(|(l, _)| *l == ComponentLabel::UspsBoxId),
                Some(&(ComponentLabel::UspsBoxId, "552".to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn po_box_with_locality() {
        let (components, classification) = parsed("PO Box 9, Reno, NV 89501");
        assert_eq!(classification, Classification::PoBox);
        assert_eq!(
            components.last(),
            Some(&(ComponentLabel::ZipCode, "89501".to_string()))
        );
    }

    #[test]
    fn repeated_unit_designator_is_reported() {
        let outcome = UsAddressTagger::default().tag("1 Main St Apt 4 Ste 5");
        assert_eq!(
            outcome,
            TagOutcome::Unparseable {
                reason: UnparseableReason::RepeatedLabel {
                    label: ComponentLabel::OccupancyType
                }
            }
        );
    }

    #[test]
    fn second_house_number_is_reported() {
        let outcome = UsAddressTagger::default().tag("123 Main St 456 Elm Ave");
        assert_eq!(
            outcome,
            TagOutcome::Unparseable {
                reason: UnparseableReason::RepeatedLabel {
                    label: ComponentLabel::AddressNumber
                }
            }
        );
    }

    #[test]
    fn missing_house_number_is_malformed() {
        let outcome = UsAddressTagger::default().tag("asdkjasd 99 !!");
        assert!(matches!(
            outcome,
            TagOutcome::Unparseable {
                reason: UnparseableReason::Malformed { .. }
            }
        ));
    }

    #[test]
    fn empty_and_punctuation_only_are_malformed() {
        for raw in ["", "   ", ",,,", "!!"] {
            assert!(
                matches!(UsAddressTagger::default().tag(raw), TagOutcome::Unparseable { .. }),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn number_only_is_malformed() {
        assert!(matches!(
            UsAddressTagger::default().tag("123"),
            TagOutcome::Unparseable { .. }
        ));
    }
}
