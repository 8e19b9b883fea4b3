//! Interpolation tables for tabulated closures.
//!
//! Tables are constructed once from configuration (raw arrays or a delimited
//! text file) and live for the run; every subsequent lookup is in-memory and
//! allocation-free. Out-of-range queries extrapolate the boundary segment's
//! slope rather than failing, which is the documented edge policy for solver
//! states that briefly leave the sampled domain.

mod one;
mod two;

use std::path::Path;

use crate::TableError;

pub use one::Table1D;
pub use two::{GridSpec, Table2D};

/// Reads the numeric rows of a delimited table file, each paired with its
/// one-based line number in the file so parse errors can point at the
/// offending line.
///
/// Blank lines and `#` comments are skipped. Columns may be separated by
/// whitespace or commas.
fn read_numeric_rows(path: &Path) -> Result<Vec<(usize, Vec<f64>)>, TableError> {
    let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut rows = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let row = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<f64>().map_err(|_| TableError::Parse {
                    path: path.display().to_string(),
                    line: index + 1,
                    reason: format!("`{token}` is not a number"),
                })
            })
            .collect::<Result<Vec<f64>, TableError>>()?;
        rows.push((index + 1, row));
    }

    Ok(rows)
}
