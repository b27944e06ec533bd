//! Row-level progress reporting for cleaning runs.
//!
//! [`clean`](crate::clean) announces how many addresses it will normalize,
//! ticks once per row, and closes with a summary. Whether that becomes a
//! terminal bar is up to the caller; the `indicatif` bar lives in
//! `lead_cleaner_cli_utils`.

use std::sync::Arc;

/// Receives progress from a cleaning run.
///
/// Shared as `Arc<dyn ProgressCallback>`, so implementations must be
/// `Send + Sync`.
pub trait ProgressCallback: Send + Sync {
    /// Number of rows the address pass will visit.
    fn set_total(&self, total: u64);

    /// `delta` more rows are done.
    fn inc(&self, delta: u64);

    /// Names the current stage.
    fn set_message(&self, msg: String);

    /// The run is over; `msg` summarizes it.
    fn finish(&self, msg: String);
}

/// Discards every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// A shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use lead_cleaner_leads_models::{CleanerConfig, CleaningOption};

    use super::*;
    use crate::table::LeadTable;

    /// Records every call as a line of text.
    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Recorder {
        fn push(&self, event: String) {
            self.0.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl ProgressCallback for Recorder {
        fn set_total(&self, total: u64) {
            self.push(format!("total {total}"));
        }
        fn inc(&self, delta: u64) {
            self.push(format!("inc {delta}"));
        }
        fn set_message(&self, msg: String) {
            self.push(format!("message {msg}"));
        }
        fn finish(&self, msg: String) {
            self.push(format!("finish {msg}"));
        }
    }

    #[test]
    fn address_run_reports_each_cleaned_row() {
        let input = LeadTable::from_csv_reader(
            "PERSONAL_ADDRESS,PERSONAL_CITY,HOMEOWNER\n1 Main St,Chicago,Y\n,Nowhere,N\n2 Oak Ave,Peoria,N\n"
                .as_bytes(),
        )
        .unwrap();
        let recorder = Arc::new(Recorder::default());
        let progress: Arc<dyn ProgressCallback> = recorder.clone();

        crate::clean(
            &input,
            CleaningOption::AddressHoNwIncome,
            &CleanerConfig::default(),
            &progress,
        )
        .unwrap();

        assert_eq!(
            recorder.events(),
            [
                "total 2",
                "message Cleaning addresses",
                "inc 1",
                "inc 1",
                "finish 1 file(s) from 3 rows",
            ]
        );
    }

    #[test]
    fn non_address_run_only_finishes() {
        let input = LeadTable::from_csv_reader(
            "FIRST_NAME,LAST_NAME,MOBILE_PHONE\nAnn,Lee,4155551212\n".as_bytes(),
        )
        .unwrap();
        let recorder = Arc::new(Recorder::default());
        let progress: Arc<dyn ProgressCallback> = recorder.clone();

        crate::clean(
            &input,
            CleaningOption::DialerList,
            &CleanerConfig::default(),
            &progress,
        )
        .unwrap();

        assert_eq!(recorder.events(), ["finish 1 file(s) from 1 rows"]);
    }

    #[test]
    fn null_progress_ignores_everything() {
        let progress = null_progress();
        progress.set_total(10);
        progress.inc(1);
        progress.set_message("ignored".to_string());
        progress.finish("done".to_string());
    }
}
