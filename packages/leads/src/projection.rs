//! Per-option column projections.
//!
//! Each [`CleaningOption`] maps an input lead table onto a fixed output
//! shape. Address-consuming options first drop rows with no
//! `PERSONAL_ADDRESS` and add a `PERSONAL_ADDRESS_CLEAN` column.

use std::sync::Arc;

use lead_cleaner_address::CachedNormalizer;
use lead_cleaner_leads_models::columns::{
    ADDRESS, AGE_RANGE, BUSINESS_EMAIL, CHILDREN, DATA, DIRECT_NUMBER, DNC, DUPLICATE_COUNT,
    FIRST_NAME, FULL_ADDRESS, HOMEOWNER, INCOME_RANGE, LAST_NAME, LINKEDIN_URL, MOBILE_PHONE,
    NET_WORTH, PERSONAL_ADDRESS, PERSONAL_ADDRESS_CLEAN, PERSONAL_CITY, PERSONAL_EMAIL,
    PERSONAL_STATE, PERSONAL_ZIP, PHONE, SHA256, SHA256_BUSINESS_EMAIL, SHA256_PERSONAL_EMAIL,
    SKIPTRACE_CREDIT_RATING,
};
use lead_cleaner_leads_models::{CleanerConfig, CleaningOption};

use crate::duplicates::{count_duplicates, dedupe_key, first_occurrences};
use crate::fields::{format_phone, is_do_not_call, sha256_email};
use crate::progress::ProgressCallback;
use crate::table::{LeadTable, Row};

const FULL_COMBINED_COLUMNS: &[&str] = &[
    FIRST_NAME,
    LAST_NAME,
    PHONE,
    FULL_ADDRESS,
    PERSONAL_EMAIL,
    BUSINESS_EMAIL,
    HOMEOWNER,
    NET_WORTH,
    INCOME_RANGE,
    CHILDREN,
    AGE_RANGE,
    SKIPTRACE_CREDIT_RATING,
    LINKEDIN_URL,
    DNC,
];

const PHONE_CREDIT_COLUMNS: &[&str] = &[
    FIRST_NAME,
    LAST_NAME,
    PHONE,
    PERSONAL_ADDRESS_CLEAN,
    PERSONAL_CITY,
    PERSONAL_STATE,
    PERSONAL_ZIP,
    PERSONAL_EMAIL,
    LINKEDIN_URL,
    SKIPTRACE_CREDIT_RATING,
    DNC,
];

/// Drops rows without an address and appends `PERSONAL_ADDRESS_CLEAN`.
///
/// Reports one unit of progress per remaining row.
#[must_use]
pub fn clean_addresses(
    table: &LeadTable,
    normalizer: &CachedNormalizer,
    progress: &Arc<dyn ProgressCallback>,
) -> LeadTable {
    let table = table.filter_rows(|row| row.get(PERSONAL_ADDRESS).is_some());
    progress.set_total(table.len() as u64);
    progress.set_message("Cleaning addresses".to_string());

    let cleaned: Vec<String> = table
        .iter()
        .map(|row| {
            progress.inc(1);
            normalizer.normalize(row.get_or_empty(PERSONAL_ADDRESS))
        })
        .collect();

    log::info!(
        "Cleaned {} addresses ({} distinct, {} cache hits)",
        cleaned.len(),
        normalizer.len(),
        normalizer.hits()
    );

    table.with_column(PERSONAL_ADDRESS_CLEAN, cleaned)
}

/// Builds the output table for `option` from an already address-cleaned
/// table (see [`clean_addresses`]; options that do not clean addresses
/// take the input as-is).
#[must_use]
pub fn project(table: &LeadTable, option: CleaningOption, config: &CleanerConfig) -> LeadTable {
    match option {
        CleaningOption::AddressHoNwIncome => map_import(table, false),
        CleaningOption::AddressHoNwIncomePhone => map_import(table, true),
        CleaningOption::Sha256 => hashed_emails(table),
        CleaningOption::FullCombinedAddress => full_combined(table),
        CleaningOption::PhoneCreditScore => {
            derive(table, PHONE, preferred_phone).select(PHONE_CREDIT_COLUMNS)
        }
        CleaningOption::SplitByState | CleaningOption::SplitByZip => table.clone(),
        CleaningOption::DialerList => dialer_list(table),
        CleaningOption::Deduplicated => deduplicated(table, &config.dedupe_key),
    }
}

/// Appends a column computed row by row.
fn derive(table: &LeadTable, column: &str, f: impl Fn(Row<'_>) -> String) -> LeadTable {
    let values = table.iter().map(f).collect();
    table.clone().with_column(column, values)
}

/// Mobile phone, falling back to the direct number; formatted when it
/// parses as a US number, passed through otherwise.
fn preferred_phone(row: Row<'_>) -> String {
    row.first_of(&[MOBILE_PHONE, DIRECT_NUMBER])
        .map(|p| format_phone(p).unwrap_or_else(|| p.to_string()))
        .unwrap_or_default()
}

fn map_import(table: &LeadTable, with_phone: bool) -> LeadTable {
    let table = derive(table, ADDRESS, |row| {
        format!(
            "{} {}",
            row.get_or_empty(PERSONAL_ADDRESS_CLEAN),
            row.get_or_empty(PERSONAL_CITY)
        )
        .trim()
        .to_string()
    });
    let table = derive(&table, DATA, |row| {
        let mut data = format!(
            "Ho {} | NW {} | Income {}",
            row.get_or_empty(HOMEOWNER),
            row.get_or_empty(NET_WORTH),
            row.get_or_empty(INCOME_RANGE)
        );
        if with_phone
            && !is_do_not_call(row.get(DNC))
            && let Some(phone) = row.get(MOBILE_PHONE)
        {
            data.push_str(" | Phone ");
            data.push_str(&format_phone(phone).unwrap_or_else(|| phone.to_string()));
        }
        data
    });
    table.select(&[ADDRESS, DATA])
}

fn hashed_emails(table: &LeadTable) -> LeadTable {
    derive(table, SHA256, |row| {
        row.first_of(&[SHA256_PERSONAL_EMAIL, SHA256_BUSINESS_EMAIL])
            .map(str::to_string)
            .or_else(|| row.first_of(&[PERSONAL_EMAIL, BUSINESS_EMAIL]).map(sha256_email))
            .unwrap_or_default()
    })
    .select(&[FIRST_NAME, LAST_NAME, SHA256])
}

fn full_combined(table: &LeadTable) -> LeadTable {
    let table = derive(table, FULL_ADDRESS, |row| {
        format!(
            "{} {}, {} {}",
            row.get_or_empty(PERSONAL_ADDRESS_CLEAN),
            row.get_or_empty(PERSONAL_CITY),
            row.get_or_empty(PERSONAL_STATE),
            row.get_or_empty(PERSONAL_ZIP)
        )
    });
    derive(&table, PHONE, preferred_phone).select(FULL_COMBINED_COLUMNS)
}

fn dialer_list(table: &LeadTable) -> LeadTable {
    let dialable = table.filter_rows(|row| {
        !is_do_not_call(row.get(DNC)) && dialer_phone(row).is_some()
    });
    log::info!(
        "Dialer list keeps {} of {} rows",
        dialable.len(),
        table.len()
    );
    derive(&dialable, PHONE, |row| dialer_phone(row).unwrap_or_default())
        .select(&[FIRST_NAME, LAST_NAME, PHONE])
}

/// First phone column that formats as a valid US number.
fn dialer_phone(row: Row<'_>) -> Option<String> {
    [MOBILE_PHONE, DIRECT_NUMBER]
        .iter()
        .filter_map(|c| row.get(c))
        .find_map(format_phone)
}

fn deduplicated(table: &LeadTable, extra_key_columns: &[String]) -> LeadTable {
    let keys: Vec<String> = table
        .iter()
        .map(|row| {
            dedupe_key(
                std::iter::once(row.get_or_empty(PERSONAL_ADDRESS_CLEAN)).chain(
                    extra_key_columns
                        .iter()
                        .map(|c| row.get_or_empty(c.as_str())),
                ),
            )
        })
        .collect();

    let counts = count_duplicates(keys.as_slice());
    let firsts = first_occurrences(keys.as_slice());
    let dupes = table.len() - firsts.len();
    if dupes > 0 {
        log::info!("Removed {dupes} duplicate rows");
    }

    let mut keep = firsts.iter().copied().peekable();
    let unique = table.filter_rows(|row| {
        if keep.peek() == Some(&row.index()) {
            keep.next();
            true
        } else {
            false
        }
    });

    let count_column = firsts
        .iter()
        .map(|&i| counts.get(&keys[i]).copied().unwrap_or(1).to_string())
        .collect();
    unique.with_column(DUPLICATE_COUNT, count_column)
}
