//! Post-run notes, including Google My Maps import steps for the
//! options whose output is meant to be mapped.

use lead_cleaner_leads_models::CleaningOption;

const MAP_IMPORT_STEPS: &str = "\
How to import into Google My Maps:
  1. Go to https://www.google.com/mymaps.
  2. Click \"Create a new map\".
  3. In the new map, click \"Import\" under the layer section.
  4. Upload the output file(s).
  5. Set the following:";

const MAP_IMPORT_CLEANUP: &str = "\
  6. Dismiss any locations that fail to import.
  7. Zoom out and delete any pins far from the main cluster.";

/// Summary of what the run did.
#[must_use]
pub fn processing_note(option: CleaningOption, batch_size: usize) -> String {
    let mut note = format!("Processed with the '{}' option.", option.label());
    if option.cleans_addresses() {
        note.push_str(" Addresses have been cleaned.");
    }
    if option.is_batched() && batch_size > 0 {
        note.push_str(&format!(" Files are split when they exceed {batch_size} rows."));
    }
    if let Some(column) = option.group_column() {
        note.push_str(&format!(" One file is written per {column} value."));
    }
    note
}

/// Import instructions for map-import options.
#[must_use]
pub fn import_notes(option: CleaningOption) -> Option<String> {
    if !option.is_map_import() {
        return None;
    }
    let mapping = if option == CleaningOption::SplitByState {
        "     - Placemarker pins: the PERSONAL_ADDRESS_CLEAN column, or combine it with PERSONAL_CITY and PERSONAL_STATE.\n     \
         - Placemarker title: any relevant column (e.g., FIRST_NAME, LAST_NAME)."
    } else {
        "     - Placemarker pins: the ADDRESS column.\n     \
         - Placemarker title: the DATA column."
    };
    Some(format!("{MAP_IMPORT_STEPS}\n{mapping}\n{MAP_IMPORT_CLEANUP}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_import_options_get_instructions() {
        let notes = import_notes(CleaningOption::AddressHoNwIncomePhone).unwrap();
        assert!(notes.contains("the ADDRESS column"));
        assert!(notes.contains("the DATA column"));

        let notes = import_notes(CleaningOption::SplitByState).unwrap();
        assert!(notes.contains("PERSONAL_ADDRESS_CLEAN"));
    }

    #[test]
    fn other_options_have_no_instructions() {
        assert_eq!(import_notes(CleaningOption::Sha256), None);
        assert_eq!(import_notes(CleaningOption::SplitByZip), None);
    }

    #[test]
    fn processing_note_mentions_batching_and_grouping() {
        let note = processing_note(CleaningOption::AddressHoNwIncome, 2000);
        assert!(note.contains("exceed 2000 rows"));
        assert!(note.contains("cleaned"));

        let note = processing_note(CleaningOption::SplitByState, 2000);
        assert!(note.contains("per PERSONAL_STATE value"));
        assert!(!note.contains("exceed"));

        assert!(!processing_note(CleaningOption::DialerList, 0).contains("exceed"));
    }
}
