//! Fixed file locations and column names.
//!
//! The tool takes no arguments. Every path is relative to the working
//! directory and lives under `data/`.

use std::path::{Path, PathBuf};

/// Directory holding both inputs and the output.
pub const DATA_DIR: &str = "data";

/// Reference drug table.
pub const DRUGS_FILE: &str = "drug.csv";

/// Trial table whose `drug_cui` text field is scanned.
pub const TRIALS_FILE: &str = "trials.csv";

/// Linkage table written by the run.
pub const OUTPUT_FILE: &str = "trialdrug.csv";

/// Column holding drug identifiers in the reference table and free text in
/// the trial table. Matched case-insensitively.
pub const DRUG_CUI_COLUMN: &str = "drug_cui";

/// Record identifier column of the trial table. Matched case-insensitively,
/// falls back to the first column when absent.
pub const POSTING_ID_COLUMN: &str = "PostingID";

/// Locations of the three files touched by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub drugs_csv: PathBuf,
    pub trials_csv: PathBuf,
    pub output_csv: PathBuf,
}

impl Config {
    /// Same file names as the default layout, rooted at `dir`.
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            drugs_csv: dir.join(DRUGS_FILE),
            trials_csv: dir.join(TRIALS_FILE),
            output_csv: dir.join(OUTPUT_FILE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_data_dir(DATA_DIR)
    }
}
