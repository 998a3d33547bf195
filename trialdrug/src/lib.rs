//! # Trialdrug - Clinical Trial to Drug Linkage
//!
//! Links clinical-trial postings to known drug concept identifiers (CUIs) by
//! scanning each trial's free-text `drug_cui` field for embedded identifiers
//! and keeping only those present in a reference drug table.
//!
//! ## Pipeline Overview
//!
//! 1. **Reference Loading**: Read `data/drug.csv` into a set of trimmed CUIs
//! 2. **Linkage Extraction**: Scan `data/trials.csv` row by row for `C<digits>`
//!    tokens and keep (PostingID, CUI) pairs whose CUI is known
//! 3. **Output Generation**: Sort the unique pairs and write
//!    `data/trialdrug.csv` with the header `PostingID,drug_cui`
//!
//! Each stage runs to completion before the next starts. A missing required
//! column or an unreadable input aborts the run before the output is touched.
//!
//! ## Usage
//!
//! ```no_run
//! use trialdrug::{run, Config};
//!
//! let summary = run(&Config::default())?;
//! println!("{} known drug_cuis", summary.known_cuis);
//! # Ok::<(), trialdrug::LinkError>(())
//! ```

pub mod columns;
pub mod config;
pub mod error;
pub mod linkage;
pub mod reference;
pub mod writer;

use std::path::PathBuf;

use tracing::info;

pub use config::Config;
pub use error::{LinkError, Result};
pub use linkage::{generate_linkage, CuiExtractor, Linkage, LinkagePair, LinkageStats};
pub use reference::{load_drug_cuis, DrugCuiSet};
pub use writer::write_linkage;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Size of the reference set.
    pub known_cuis: usize,
    /// Rows written to the output, header excluded.
    pub pairs_written: usize,
    pub stats: LinkageStats,
    pub output: PathBuf,
}

/// Run load, link and write over the files named by `config`.
pub fn run(config: &Config) -> Result<RunSummary> {
    let known = load_drug_cuis(&config.drugs_csv)?;
    let linkage = generate_linkage(&known, &config.trials_csv)?;
    let pairs_written = write_linkage(&linkage.pairs, &config.output_csv)?;

    info!(
        known = known.len(),
        pairs = pairs_written,
        "linkage run complete"
    );
    Ok(RunSummary {
        known_cuis: known.len(),
        pairs_written,
        stats: linkage.stats,
        output: config.output_csv.clone(),
    })
}
