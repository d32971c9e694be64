// src/normalize/mod.rs

pub mod name;

pub use name::{clean_name, fix_camelcase, strip_label};

use tracing::debug;

use crate::row::Row;

/// Marker the wiki uses for characters without an official name.
pub const UNNAMED: &str = "Unnamed";

/// Independent switches controlling [`normalize`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Drop rows whose name contains "Unnamed".
    pub known_only: bool,
    /// Remove `Label: ` prefixes from names.
    pub strip_labels: bool,
    /// Reduce every row to its name.
    pub names_only: bool,
}

/// Keep rows whose name does not contain [`UNNAMED`]. Rows without a name
/// column are kept.
pub fn remove_unknown(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .filter(|r| !r.name().is_some_and(|n| n.contains(UNNAMED)))
        .collect()
}

fn rewrite_name(row: &mut Row, f: impl Fn(&str) -> String) {
    if let Some(name) = row.cells.first_mut() {
        let rewritten = f(name.as_str());
        *name = rewritten;
    }
}

/// Filter and rewrite scraped rows.
///
/// Order matters: the `known_only` filter sees the raw names, cleanup runs on
/// every surviving row, label stripping runs on cleaned names, and the
/// names-only collapse comes last. Header rows go through every step.
pub fn normalize(rows: Vec<Row>, opts: &ScrapeOptions) -> Vec<Row> {
    let before = rows.len();
    let mut rows = if opts.known_only {
        remove_unknown(rows)
    } else {
        rows
    };
    debug!(before, after = rows.len(), "filtered rows");

    for r in &mut rows {
        rewrite_name(r, clean_name);
    }

    if opts.strip_labels {
        for r in &mut rows {
            rewrite_name(r, strip_label);
        }
    }

    if opts.names_only {
        for r in &mut rows {
            r.cells.truncate(1);
            r.link = None;
        }
    }

    rows
}
