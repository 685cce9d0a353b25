//! SQL identifier validation for column names.
//!
//! Postgres cannot bind identifiers as parameters, so every column name that
//! ends up in a generated clause passes through here first.
//!
//! - Each `.`-separated segment must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - [`quote`] renders a validated identifier as `"segment"` parts

use crate::error::{JoblyError, JoblyResult};

/// Validate an identifier, allowing dotted `table.column` notation.
pub fn validate(ident: &str) -> JoblyResult<()> {
    if ident.is_empty() {
        return Err(JoblyError::invalid_input("Identifier cannot be empty"));
    }

    for seg in ident.split('.') {
        validate_segment(ident, seg)?;
    }
    Ok(())
}

/// Validate a single, undotted column name.
pub fn validate_column(column: &str) -> JoblyResult<()> {
    if column.contains('.') {
        return Err(JoblyError::invalid_input(format!(
            "Invalid column name '{column}': qualified names are not allowed here"
        )));
    }
    validate(column)
}

/// Whether `ident` would pass [`validate`].
pub fn is_valid(ident: &str) -> bool {
    validate(ident).is_ok()
}

/// Render a validated identifier with every segment double-quoted.
///
/// Callers validate first; the segments therefore never contain `"`.
pub fn quote(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 2);
    for (i, seg) in ident.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push('"');
        out.push_str(seg);
        out.push('"');
    }
    out
}

fn validate_segment(ident: &str, seg: &str) -> JoblyResult<()> {
    let mut chars = seg.chars();
    let Some(first) = chars.next() else {
        return Err(JoblyError::invalid_input(format!(
            "Empty identifier segment in '{ident}'"
        )));
    };

    if !(first == '_' || first.is_ascii_alphabetic()) {
        return Err(JoblyError::invalid_input(format!(
            "Invalid identifier start character '{first}' in '{ident}'"
        )));
    }

    if let Some(bad) = chars.find(|&c| !(c == '_' || c == '$' || c.is_ascii_alphanumeric())) {
        return Err(JoblyError::invalid_input(format!(
            "Invalid character '{bad}' in identifier '{ident}'"
        )));
    }
    Ok(())
}
