//! Partial-update and filter clause building.
//!
//! Both builders turn an order-preserving payload into a SQL fragment with
//! `$1, $2, ...` placeholders plus the values to bind, in the same order. The
//! caller splices the fragment into its statement template:
//!
//! ```ignore
//! use jobly::clause::{build_set_clause, build_where_clause};
//!
//! let set = build_set_clause(&payload, &field_map)?;
//! let sql = format!(
//!     "UPDATE companies SET {} WHERE handle = ${}",
//!     set.sql,
//!     set.next_placeholder()
//! );
//!
//! let filter = build_where_clause(&query, &company_filter_spec());
//! let sql = format!("SELECT handle, name FROM companies {} ORDER BY name", filter.sql);
//! ```

mod presets;
mod spec;

pub use presets::{
    EQUITY_THRESHOLD, build_job_where_clause, company_field_map, company_filter_spec,
    job_field_map, job_filter_spec, normalize_job_query,
};
pub use spec::{FieldMap, FilterOp, FilterRule, FilterSpec};

use crate::error::{JoblyError, JoblyResult};
use crate::ident;
use crate::value::SqlValue;
use indexmap::IndexMap;
use std::fmt::Write;
use tokio_postgres::types::ToSql;

/// Field name to new value, in the order the fields were supplied.
pub type UpdatePayload = IndexMap<String, SqlValue>;

/// Query key to raw filter value, in the order the keys were supplied.
pub type QueryPayload = IndexMap<String, SqlValue>;

/// A generated SQL fragment and its positional parameter values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clause {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl Clause {
    /// True when nothing was generated (no filter applies).
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Index of the placeholder that follows this clause's values.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Build a `SET` fragment for a partial update.
///
/// Every payload field becomes `"<column>"=$<n>` with `n` counting from 1 in
/// payload order; the values are returned in the same order with their types
/// untouched. Fields missing from `field_map` use their own name as the column,
/// which must still be a plain identifier.
///
/// # Errors
/// [`JoblyError::InvalidInput`] when the payload is empty or a resolved column
/// is not a valid identifier.
pub fn build_set_clause(payload: &UpdatePayload, field_map: &FieldMap) -> JoblyResult<Clause> {
    if payload.is_empty() {
        return Err(JoblyError::invalid_input("No data"));
    }

    let mut sql = String::new();
    let mut values = Vec::with_capacity(payload.len());

    for (idx, (field, value)) in payload.iter().enumerate() {
        let column = field_map.column_for(field);
        ident::validate_column(column)?;

        if idx > 0 {
            sql.push_str(", ");
        }
        let _ = write!(sql, "{}=${}", ident::quote(column), idx + 1);
        values.push(value.clone());
    }

    tracing::debug!(
        target: "jobly.sql",
        clause = %sql,
        param_count = values.len(),
        "built SET clause"
    );
    Ok(Clause { sql, values })
}

/// Build a `WHERE` fragment from the query keys that `spec` accepts.
///
/// Keys are visited in query order. Unknown keys are skipped, as are absent
/// values: `Null` and the empty string. This is a presence check, not a
/// truthiness check, so `0` and `false` still filter. Placeholders are
/// numbered only for emitted predicates and stay contiguous.
///
/// Returns an empty clause when nothing matched; the caller then omits the
/// `WHERE` entirely.
pub fn build_where_clause(query: &QueryPayload, spec: &FilterSpec) -> Clause {
    let mut sql = String::new();
    let mut values = Vec::new();

    for (key, value) in query {
        let Some(rule) = spec.get(key) else {
            continue;
        };
        if !value.is_present() {
            continue;
        }

        sql.push_str(if values.is_empty() { "WHERE " } else { " AND " });
        let _ = write!(
            sql,
            "{} {} ${}",
            rule.column,
            rule.op.as_sql(),
            values.len() + 1
        );

        values.push(if rule.op.is_pattern() {
            value.to_contains_pattern()
        } else {
            value.clone()
        });
    }

    tracing::debug!(
        target: "jobly.sql",
        clause = %sql,
        param_count = values.len(),
        "built WHERE clause"
    );
    Clause { sql, values }
}

#[cfg(test)]
mod tests;
