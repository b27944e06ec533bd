//! Splitting a projected table into named output files.

use std::collections::BTreeSet;

use lead_cleaner_leads_models::CleaningOption;
use lead_cleaner_leads_models::columns::PERSONAL_STATE;

use crate::fields::zip5;
use crate::table::LeadTable;

/// A table and the file stem it is written under (no extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub table: LeadTable,
}

impl OutputFile {
    #[must_use]
    pub fn new(name: impl Into<String>, table: LeadTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

/// Splits `table` into the files `option` produces.
///
/// Grouped options yield one file per group key, in key order. Group keys
/// come from free-text cells, so they are reduced to file-name-safe
/// characters and suffixed `_2`, `_3`, ... when two keys reduce to the
/// same name. Option labels are used verbatim. Batched
/// options yield `_part_{n}` files only when the table exceeds
/// `batch_size` rows (`0` disables batching). Everything else is a single
/// file.
#[must_use]
pub fn split_outputs(table: LeadTable, option: CleaningOption, batch_size: usize) -> Vec<OutputFile> {
    let stem = format!("output_{}", option.slug());

    if let Some(column) = option.group_column() {
        let groups = if column == PERSONAL_STATE {
            table.group_by(column, |state| Some(state.to_uppercase()))
        } else {
            table.group_by(column, zip5)
        };
        log::info!("Split into {} groups by {column}", groups.len());
        let mut used = BTreeSet::new();
        return groups
            .into_iter()
            .map(|(key, group)| {
                let base = format!("{stem}_{}", sanitize_group_key(&key));
                OutputFile::new(unique_name(&mut used, base), group)
            })
            .collect();
    }

    if option.is_batched() {
        let chunks = table.chunks(batch_size);
        if chunks.len() > 1 {
            log::info!("Split into {} batches of up to {batch_size} rows", chunks.len());
            return chunks
                .into_iter()
                .enumerate()
                .map(|(i, chunk)| OutputFile::new(format!("{stem}_part_{}", i + 1), chunk))
                .collect();
        }
    }

    vec![OutputFile::new(stem, table)]
}

/// Reduces a group key to `[A-Za-z0-9_-]`, turning whitespace into `_`,
/// dropping anything else, and collapsing runs of `_`. A key with nothing
/// left becomes `UNKNOWN`.
#[must_use]
pub fn sanitize_group_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if (ch == '_' || ch.is_whitespace()) && !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "UNKNOWN".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `base`, or `base_{n}` for the smallest `n >= 2` not yet in `used`.
fn unique_name(used: &mut BTreeSet<String>, base: String) -> String {
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if used.insert(candidate.clone()) {
            log::warn!("Group file name {base} is taken, writing {candidate}");
            return candidate;
        }
        n += 1;
    }
}
