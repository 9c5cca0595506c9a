//! Tabular description format.
//!
//! One transition per line, four fields separated by single spaces:
//!
//! ```text
//! <state_no> <input> <output> <next>
//! ```
//!
//! Any line that does not split into exactly four fields, or whose state
//! numbers are not integers, rejects the whole description.

use crate::error::CoreError;
use crate::table::{StateNo, Table, TableBuilder, Tuple};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Options applied when loading a description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Reject duplicate state groups and dangling destinations.
    pub strict: bool,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Parses one description line. `line_no` is 1-based and only used for errors.
pub fn parse_tuple(line_no: usize, line: &str) -> Result<Tuple, CoreError> {
    let mut fields: Vec<&str> = line.split(' ').collect();
    // Trailing separators do not produce fields
    while fields.last() == Some(&"") {
        fields.pop();
    }

    if fields.len() != 4 {
        return Err(CoreError::MalformedTuple {
            line: line_no,
            reason: format!("expected 4 fields, found {}", fields.len()),
        });
    }

    let state_no = parse_state_no(line_no, fields[0])?;
    let next = parse_state_no(line_no, fields[3])?;

    Ok(Tuple::new(state_no, fields[1], fields[2], next))
}

fn parse_state_no(line_no: usize, field: &str) -> Result<StateNo, CoreError> {
    field.parse().map_err(|_| CoreError::MalformedTuple {
        line: line_no,
        reason: format!("invalid state number '{}'", field),
    })
}

/// Parses a whole description.
///
/// Whitespace-only lines at the end of the text are ignored; anywhere else
/// they are malformed.
pub fn parse_table(text: &str, options: LoadOptions) -> Result<Table, CoreError> {
    let lines: Vec<&str> = text.lines().collect();
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(0, |i| i + 1);

    let mut tuples = Vec::with_capacity(end);
    for (i, line) in lines[..end].iter().enumerate() {
        tuples.push((i + 1, parse_tuple(i + 1, line)?));
    }

    let mut builder = TableBuilder::new();
    for (_, tuple) in &tuples {
        builder.push(tuple.clone());
    }
    let table = builder.build();

    if options.strict {
        validate(&table, &tuples)?;
    }

    Ok(table)
}

/// Reads and parses a description file.
///
/// A file that cannot be opened yields [`CoreError::SourceNotFound`]; callers
/// decide whether to degrade to an empty table.
pub fn load_table(path: impl AsRef<Path>, options: LoadOptions) -> Result<Table, CoreError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| CoreError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    // Undecodable bytes become U+FFFD rather than failing the load
    let text = String::from_utf8_lossy(&bytes);

    let table = parse_table(&text, options)?;
    tracing::debug!(
        "loaded {}: {} states, {} transitions",
        path.display(),
        table.len(),
        table.transition_count()
    );
    Ok(table)
}

fn validate(table: &Table, tuples: &[(usize, Tuple)]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    let mut open = None;

    for (line, tuple) in tuples {
        if open != Some(tuple.state_no) {
            if !seen.insert(tuple.state_no) {
                tracing::warn!(
                    "state {} reopened at line {}",
                    tuple.state_no,
                    line
                );
                return Err(CoreError::MalformedTuple {
                    line: *line,
                    reason: format!(
                        "state {} already defined by an earlier group",
                        tuple.state_no
                    ),
                });
            }
            open = Some(tuple.state_no);
        }

        if table.index_of(tuple.next).is_none() {
            tracing::warn!(
                "transition at line {} targets missing state {}",
                line,
                tuple.next
            );
            return Err(CoreError::MalformedTuple {
                line: *line,
                reason: format!("destination state {} does not exist", tuple.next),
            });
        }
    }

    Ok(())
}
