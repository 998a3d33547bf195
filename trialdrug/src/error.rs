use std::path::PathBuf;

use thiserror::Error;

/// Every way a linkage run can fail. All of them abort the run.
#[derive(Debug, Error)]
pub enum LinkError {
    /// A required column is absent from an input header row.
    #[error("{column} column not found in {}", path.display())]
    MissingColumn { column: &'static str, path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("identifier pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

impl LinkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LinkError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        LinkError::Csv {
            path: path.into(),
            source,
        }
    }

    /// True for schema failures, i.e. a missing required column.
    pub fn is_schema(&self) -> bool {
        matches!(self, LinkError::MissingColumn { .. })
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_message_names_column_and_file() {
        let err = LinkError::MissingColumn {
            column: "drug_cui",
            path: PathBuf::from("data/drug.csv"),
        };
        assert!(err.is_schema());
        assert_eq!(err.to_string(), "drug_cui column not found in data/drug.csv");
    }

    #[test]
    fn io_error_is_not_schema() {
        let err = LinkError::io(
            "data/trials.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(!err.is_schema());
        assert!(err.to_string().starts_with("I/O error on data/trials.csv"));
    }
}
