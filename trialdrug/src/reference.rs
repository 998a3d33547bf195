//! Reference drug identifier loading.
//!
//! Reads the `drug_cui` column of the reference table into a set. Values are
//! trimmed, blanks are skipped, and repeats collapse silently.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::columns::{field, find_column};
use crate::config::DRUG_CUI_COLUMN;
use crate::error::{LinkError, Result};

/// Known drug identifiers, trimmed and non-empty.
pub type DrugCuiSet = HashSet<String>;

/// Load the reference set from the CSV file at `path`.
///
/// # Arguments
///
/// * `path` - Reference drug table with a `drug_cui` column (any case)
///
/// # Returns
///
/// Every distinct non-blank `drug_cui` value, trimmed
///
/// # Errors
///
/// - [`LinkError::Io`] if the file cannot be opened
/// - [`LinkError::MissingColumn`] if no header matches `drug_cui`
/// - [`LinkError::Csv`] if a row cannot be read
pub fn load_drug_cuis(path: &Path) -> Result<DrugCuiSet> {
    let file = File::open(path).map_err(|e| LinkError::io(path, e))?;
    read_drug_cuis(file, path)
}

/// Same as [`load_drug_cuis`] over any reader. `source` only labels errors.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use trialdrug::reference::read_drug_cuis;
///
/// let csv = "name,Drug_CUI\nalbuterol, C0002871 \nblank,\ndup,C0002871\n";
/// let cuis = read_drug_cuis(csv.as_bytes(), Path::new("drug.csv"))?;
/// assert_eq!(cuis.len(), 1);
/// assert!(cuis.contains("C0002871"));
/// # Ok::<(), trialdrug::LinkError>(())
/// ```
pub fn read_drug_cuis<R: Read>(input: R, source: &Path) -> Result<DrugCuiSet> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| LinkError::csv(source, e))?
        .clone();
    let cui_idx = find_column(&headers, DRUG_CUI_COLUMN).ok_or_else(|| {
        LinkError::MissingColumn {
            column: DRUG_CUI_COLUMN,
            path: source.to_path_buf(),
        }
    })?;
    debug!(column = cui_idx, "resolved reference drug_cui column");

    let mut cuis = DrugCuiSet::new();
    let mut rows = 0usize;
    let mut record = StringRecord::new();
    while reader
        .read_record(&mut record)
        .map_err(|e| LinkError::csv(source, e))?
    {
        rows += 1;
        let value = field(&record, cui_idx).trim();
        if value.is_empty() {
            continue;
        }
        cuis.insert(value.to_string());
    }

    info!(
        rows,
        unique = cuis.len(),
        "loaded reference drug_cuis from {}",
        source.display()
    );
    Ok(cuis)
}
