//! # Trialdrug
//!
//! Command-line entry point for the trial to drug linkage pipeline. Takes no
//! arguments: inputs are read from `data/drug.csv` and `data/trials.csv`, and
//! the linkage table is written to `data/trialdrug.csv`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release
//! RUST_LOG=trialdrug=debug cargo run --release
//! ```

use std::error::Error;

use tracing_subscriber::EnvFilter;
use trialdrug::{run, Config};

/// Main entry point for the linkage pipeline
///
/// ## Output
///
/// A single summary line on stdout. Diagnostics go to stderr through
/// `tracing`, filtered by `RUST_LOG` and quiet below `warn` by default.
///
/// ## Error Handling
///
/// Any schema or I/O error aborts the run with a non-zero exit status and no
/// output file written.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let summary = run(&Config::default())?;

    println!(
        "Wrote {} with links for {} known drug_cuis.",
        summary.output.display(),
        summary.known_cuis
    );

    Ok(())
}
