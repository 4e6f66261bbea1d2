//! `prex ops`: the registry as a table.

use std::fmt::Write as _;

use prex_eval::{registry, EntryKind};

/// Render every registry entry as `name  symbol  kind`, one per line.
pub fn list_operators() -> String {
    let entries: Vec<_> = registry().iter().collect();
    let width = entries.iter().map(|entry| entry.name.len()).max().unwrap_or(0);

    let mut out = String::new();
    for entry in entries {
        let kind = match entry.kind {
            EntryKind::Operator(_) => "operator",
            EntryKind::Form(_) => "form",
        };
        // writing to a String cannot fail
        let _ = writeln!(out, "{:<width$}  {:<4}  {kind}", entry.name, entry.symbol);
    }
    out
}
