//! Breakpoint-aware statement splitter for migration files.
//!
//! Migration files delimit statements with an explicit marker rather than bare
//! semicolons, since semicolons legitimately appear inside trigger and view
//! bodies. The splitter honours SQL quoting and comment rules, so a marker
//! inside a string literal, quoted identifier, or comment is never a boundary.

use crate::error::{SqlError, SqlResult};

/// Marker separating statements in a migration file
pub const STATEMENT_BREAKPOINT: &str = "--> statement-breakpoint";

/// Split raw migration SQL into trimmed, non-empty statements in source order.
///
/// Returns an error if a string literal, quoted identifier, or block comment
/// is left unterminated at end of input.
pub fn split_sql(sql: &str) -> SqlResult<Vec<String>> {
    let bytes = sql.as_bytes();
    let mut statements = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    let mut line = 1usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                line += 1;
                i += 1;
            }
            b'\'' => i = scan_quoted(sql, i, &mut line, b'\'', "string literal")?,
            b'"' => i = scan_quoted(sql, i, &mut line, b'"', "quoted identifier")?,
            b'`' => i = scan_quoted(sql, i, &mut line, b'`', "quoted identifier")?,
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = scan_block_comment(sql, i, &mut line)?;
            }
            // The breakpoint marker starts with `--`, so it must be checked
            // before the line comment rule.
            b'-' if sql[i..].starts_with(STATEMENT_BREAKPOINT) => {
                push_segment(&mut statements, &sql[start..i]);
                i += STATEMENT_BREAKPOINT.len();
                start = i;
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }

    push_segment(&mut statements, &sql[start..]);
    Ok(statements)
}

/// Trim a segment and keep it only if anything remains
fn push_segment(statements: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

/// Scan past a quoted region opened at `open`, honouring doubled-quote escapes.
/// Returns the index just after the closing quote.
fn scan_quoted(
    sql: &str,
    open: usize,
    line: &mut usize,
    quote: u8,
    kind: &'static str,
) -> SqlResult<usize> {
    let bytes = sql.as_bytes();
    let opened_on = *line;
    let mut i = open + 1;

    while i < bytes.len() {
        if bytes[i] == b'\n' {
            *line += 1;
            i += 1;
        } else if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
            } else {
                return Ok(i + 1);
            }
        } else {
            i += 1;
        }
    }

    Err(SqlError::UnterminatedString {
        kind,
        line: opened_on,
    })
}

/// Scan past a block comment opened at `open`. Returns the index just after
/// the closing `*/`.
fn scan_block_comment(sql: &str, open: usize, line: &mut usize) -> SqlResult<usize> {
    let bytes = sql.as_bytes();
    let opened_on = *line;
    let mut i = open + 2;

    while i < bytes.len() {
        if bytes[i] == b'\n' {
            *line += 1;
            i += 1;
        } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            return Ok(i + 2);
        } else {
            i += 1;
        }
    }

    Err(SqlError::UnterminatedComment { line: opened_on })
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
