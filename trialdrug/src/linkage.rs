//! # Trial to drug linkage
//!
//! Scans the free-text `drug_cui` field of every trial row for embedded
//! identifiers and keeps the ones present in the reference set.
//!
//! ## Matching
//!
//! An identifier token is an uppercase `C` followed by one or more decimal
//! digits, Unicode digits included. Tokens are taken leftmost-first and never
//! overlap, so `"C0002871,C0012345"` yields two tokens and `"C0002871X9"`
//! yields one.
//! The digit run is unbounded: a numeral glued to a real identifier becomes
//! part of the token and usually fails the reference lookup.
//!
//! ## Record identifier
//!
//! Taken from the `PostingID` column, or from the first column when the trial
//! table has no such header. Values are trimmed; empty ones are kept.
//!
//! ## Short rows
//!
//! A row with fewer cells than the header is skipped whole and only counted
//! in [`LinkageStats::short_rows`].

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::columns::{field, find_column};
use crate::config::{DRUG_CUI_COLUMN, POSTING_ID_COLUMN};
use crate::error::{LinkError, Result};
use crate::reference::DrugCuiSet;

/// Identifier token: `C` then at least one decimal digit (any Unicode `Nd`).
pub const CUI_PATTERN: &str = r"C\d+";

/// One (trial, drug) association.
///
/// Field order gives the derived ordering: by posting id, then by drug cui.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LinkagePair {
    #[serde(rename = "PostingID")]
    pub posting_id: String,

    #[serde(rename = "drug_cui")]
    pub drug_cui: String,
}

impl LinkagePair {
    pub fn new(posting_id: impl Into<String>, drug_cui: impl Into<String>) -> Self {
        Self {
            posting_id: posting_id.into(),
            drug_cui: drug_cui.into(),
        }
    }
}

/// Counters collected during one pass over the trial table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkageStats {
    /// Data rows read, header excluded.
    pub rows: usize,
    /// Rows missing cells relative to the header; skipped without scanning.
    pub short_rows: usize,
    /// Tokens matching the identifier pattern, repeats included.
    pub candidates: usize,
    /// Tokens dropped because they are not in the reference set.
    pub unknown: usize,
}

/// Result of the extraction stage: the unique pairs, unordered.
#[derive(Debug, Clone, Default)]
pub struct Linkage {
    pub pairs: HashSet<LinkagePair>,
    pub stats: LinkageStats,
}

/// Finds identifier tokens in free text.
#[derive(Debug, Clone)]
pub struct CuiExtractor {
    pattern: Regex,
}

impl CuiExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(CUI_PATTERN)?,
        })
    }

    /// All non-overlapping identifier tokens in `text`, in order of
    /// appearance. Repeats are returned as many times as they occur.
    pub fn extract<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern.find_iter(text).map(|m| m.as_str())
    }
}

/// Column positions resolved from the trial header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrialColumns {
    posting_id: usize,
    drug_cui: usize,
}

impl TrialColumns {
    fn resolve(headers: &StringRecord, source: &Path) -> Result<Self> {
        let drug_cui =
            find_column(headers, DRUG_CUI_COLUMN).ok_or_else(|| LinkError::MissingColumn {
                column: DRUG_CUI_COLUMN,
                path: source.to_path_buf(),
            })?;
        // A drug_cui header exists, so column 0 does too.
        let posting_id = find_column(headers, POSTING_ID_COLUMN).unwrap_or_else(|| {
            debug!(
                "no {} column in {}, using first column",
                POSTING_ID_COLUMN,
                source.display()
            );
            0
        });
        Ok(Self {
            posting_id,
            drug_cui,
        })
    }
}

/// Link every trial row in the CSV file at `path` against `known`.
///
/// # Arguments
///
/// * `known` - Reference set from [`crate::reference::load_drug_cuis`]
/// * `path` - Trial table with a `drug_cui` text column and, usually, a
///   `PostingID` column
///
/// # Returns
///
/// The unique (PostingID, CUI) pairs whose CUI is in `known`, unordered,
/// together with the scan counters
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use trialdrug::{generate_linkage, load_drug_cuis};
///
/// let known = load_drug_cuis(Path::new("data/drug.csv"))?;
/// let linkage = generate_linkage(&known, Path::new("data/trials.csv"))?;
/// assert!(linkage.pairs.iter().all(|p| known.contains(&p.drug_cui)));
/// # Ok::<(), trialdrug::LinkError>(())
/// ```
///
/// # Errors
///
/// - [`LinkError::Io`] if the file cannot be opened
/// - [`LinkError::MissingColumn`] if no header matches `drug_cui`
/// - [`LinkError::Csv`] if a row cannot be read
pub fn generate_linkage(known: &DrugCuiSet, path: &Path) -> Result<Linkage> {
    let file = File::open(path).map_err(|e| LinkError::io(path, e))?;
    link_trials(known, file, path)
}

/// Same as [`generate_linkage`] over any reader. `source` only labels errors.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use trialdrug::linkage::{link_trials, LinkagePair};
///
/// let known = ["C0002871".to_string()].into_iter().collect();
/// let csv = "PostingID,drug_cui\nT1,Patient given C0002871 and C9999999\n";
/// let linkage = link_trials(&known, csv.as_bytes(), Path::new("trials.csv"))?;
/// assert_eq!(
///     linkage.pairs.into_iter().collect::<Vec<_>>(),
///     vec![LinkagePair::new("T1", "C0002871")]
/// );
/// # Ok::<(), trialdrug::LinkError>(())
/// ```
pub fn link_trials<R: Read>(known: &DrugCuiSet, input: R, source: &Path) -> Result<Linkage> {
    let extractor = CuiExtractor::new()?;
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| LinkError::csv(source, e))?
        .clone();
    let columns = TrialColumns::resolve(&headers, source)?;

    let mut linkage = Linkage::default();
    let mut record = StringRecord::new();
    while reader
        .read_record(&mut record)
        .map_err(|e| LinkError::csv(source, e))?
    {
        let stats = &mut linkage.stats;
        stats.rows += 1;
        if record.len() < headers.len() {
            stats.short_rows += 1;
            debug!(
                row = stats.rows,
                cells = record.len(),
                expected = headers.len(),
                "skipping short trial row"
            );
            continue;
        }

        let posting_id = field(&record, columns.posting_id).trim();
        for cui in extractor.extract(field(&record, columns.drug_cui)) {
            stats.candidates += 1;
            if !known.contains(cui) {
                stats.unknown += 1;
                continue;
            }
            linkage.pairs.insert(LinkagePair::new(posting_id, cui));
        }
    }

    info!(
        rows = linkage.stats.rows,
        candidates = linkage.stats.candidates,
        unknown = linkage.stats.unknown,
        pairs = linkage.pairs.len(),
        "linked trials from {}",
        source.display()
    );
    Ok(linkage)
}
