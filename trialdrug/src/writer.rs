//! Linkage table output.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::info;

use crate::config::{DRUG_CUI_COLUMN, POSTING_ID_COLUMN};
use crate::error::{LinkError, Result};
use crate::linkage::LinkagePair;

/// Sort `pairs` and write them to `path`, replacing any existing file.
///
/// Missing parent directories are created first.
///
/// # Arguments
///
/// * `pairs` - Unique linkage pairs in any order
/// * `path` - Destination CSV file
///
/// # Returns
///
/// Number of data rows written, header excluded
///
/// # Errors
///
/// - [`LinkError::Io`] if the directory or file cannot be created
/// - [`LinkError::Csv`] if a row cannot be written
pub fn write_linkage(pairs: &HashSet<LinkagePair>, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LinkError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| LinkError::io(path, e))?;
    let written = write_pairs(pairs, file, path)?;
    info!(rows = written, "wrote linkage table to {}", path.display());
    Ok(written)
}

/// Write the header and the sorted pairs to `out`. `dest` only labels errors.
///
/// Rows end in CRLF and cells are quoted only when needed.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use std::path::Path;
/// use trialdrug::{writer::write_pairs, LinkagePair};
///
/// let pairs: HashSet<_> = [LinkagePair::new("T2", "C1"), LinkagePair::new("T1", "C9")]
///     .into_iter()
///     .collect();
/// let mut out = Vec::new();
/// write_pairs(&pairs, &mut out, Path::new("trialdrug.csv"))?;
/// assert_eq!(out, b"PostingID,drug_cui\r\nT1,C9\r\nT2,C1\r\n");
/// # Ok::<(), trialdrug::LinkError>(())
/// ```
pub fn write_pairs<W: Write>(pairs: &HashSet<LinkagePair>, out: W, dest: &Path) -> Result<usize> {
    let mut sorted: Vec<&LinkagePair> = pairs.iter().collect();
    sorted.sort();

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(out);

    // Written by hand so an empty linkage still gets a header row.
    writer
        .write_record([POSTING_ID_COLUMN, DRUG_CUI_COLUMN])
        .map_err(|e| LinkError::csv(dest, e))?;
    for pair in &sorted {
        writer
            .serialize(pair)
            .map_err(|e| LinkError::csv(dest, e))?;
    }
    writer.flush().map_err(|e| LinkError::io(dest, e))?;

    Ok(sorted.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(pairs: &HashSet<LinkagePair>) -> String {
        let mut buf = Vec::new();
        write_pairs(pairs, &mut buf, Path::new("out.csv")).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn rows_are_sorted_by_posting_then_cui() {
        let pairs: HashSet<_> = [
            LinkagePair::new("T2", "C1"),
            LinkagePair::new("T1", "C20"),
            LinkagePair::new("T1", "C100"),
            LinkagePair::new("T10", "C5"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            render(&pairs),
            "PostingID,drug_cui\r\nT1,C100\r\nT1,C20\r\nT10,C5\r\nT2,C1\r\n"
        );
    }

    #[test]
    fn empty_linkage_still_has_header() {
        assert_eq!(render(&HashSet::new()), "PostingID,drug_cui\r\n");
    }

    #[test]
    fn awkward_ids_are_quoted() {
        let pairs: HashSet<_> = [LinkagePair::new("T,1", "C1")].into_iter().collect();
        assert_eq!(render(&pairs), "PostingID,drug_cui\r\n\"T,1\",C1\r\n");
    }

    #[test]
    fn output_is_deterministic() {
        let pairs: HashSet<_> = (0..50)
            .map(|i| LinkagePair::new(format!("T{}", i % 7), format!("C{i}")))
            .collect();
        assert_eq!(render(&pairs), render(&pairs));
    }

    #[test]
    fn creates_missing_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/trialdrug.csv");
        let pairs: HashSet<_> = [LinkagePair::new("T1", "C1")].into_iter().collect();

        assert_eq!(write_linkage(&pairs, &path).unwrap(), 1);
        assert_eq!(write_linkage(&HashSet::new(), &path).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "PostingID,drug_cui\r\n");
    }
}
