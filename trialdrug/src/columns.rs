//! Header lookup shared by both readers.

use csv::StringRecord;

/// Index of the column read for header `name`.
///
/// The first header equal to `name` ignoring ASCII case picks the spelling.
/// When that exact spelling repeats, the last column carrying it wins, the
/// same way a later key overwrites an earlier one in a row keyed by header.
/// Empty header cells never match, even when `name` is empty.
///
/// # Arguments
///
/// * `headers` - Header row of a CSV table
/// * `name` - Column name to look for
///
/// # Returns
///
/// The column index, or `None` when no header matches
///
/// # Examples
///
/// ```
/// use csv::StringRecord;
/// use trialdrug::columns::find_column;
///
/// let headers = StringRecord::from(vec!["id", "Drug_CUI"]);
/// assert_eq!(find_column(&headers, "drug_cui"), Some(1));
/// assert_eq!(find_column(&headers, "PostingID"), None);
/// ```
pub fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    let spelling = headers
        .iter()
        .find(|header| !header.is_empty() && header.eq_ignore_ascii_case(name))?;
    (0..headers.len())
        .rev()
        .find(|&idx| headers.get(idx) == Some(spelling))
}

/// Cell `idx` of `record`, or `""` when the row is too short.
pub fn field<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_case_insensitive_match_wins() {
        let headers = StringRecord::from(vec!["POSTINGID", "postingid", "drug_cui"]);
        assert_eq!(find_column(&headers, "PostingID"), Some(0));
    }

    #[test]
    fn exact_duplicate_header_reads_last_column() {
        let headers = StringRecord::from(vec!["drug_cui", "id", "drug_cui"]);
        assert_eq!(find_column(&headers, "drug_cui"), Some(2));
    }

    #[test]
    fn differently_cased_duplicate_keeps_first_spelling() {
        let headers = StringRecord::from(vec!["Drug_CUI", "drug_cui", "Drug_CUI"]);
        assert_eq!(find_column(&headers, "drug_cui"), Some(2));
        let headers = StringRecord::from(vec!["drug_cui", "DRUG_CUI"]);
        assert_eq!(find_column(&headers, "drug_cui"), Some(0));
    }

    #[test]
    fn empty_headers_are_skipped() {
        let headers = StringRecord::from(vec!["", "x"]);
        assert_eq!(find_column(&headers, ""), None);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let record = StringRecord::from(vec!["T1"]);
        assert_eq!(field(&record, 0), "T1");
        assert_eq!(field(&record, 3), "");
    }
}
