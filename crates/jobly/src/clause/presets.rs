//! Field maps and filter whitelists for the `companies` and `jobs` tables.

use super::{Clause, FieldMap, FilterOp, FilterSpec, QueryPayload, build_where_clause};
use crate::value::SqlValue;

/// Bound in place of any `hasEquity` value: `equity > 0.0` means "offers equity".
pub const EQUITY_THRESHOLD: &str = "0.0";

const HAS_EQUITY: &str = "hasEquity";

pub fn company_field_map() -> FieldMap {
    FieldMap::new()
        .map("numEmployees", "num_employees")
        .map("logoUrl", "logo_url")
}

pub fn company_filter_spec() -> FilterSpec {
    FilterSpec::new()
        .rule("minEmployees", "num_employees", FilterOp::Gte)
        .rule("maxEmployees", "num_employees", FilterOp::Lte)
        .rule("nameLike", "name", FilterOp::ILike)
}

/// Job fields share their column names.
pub fn job_field_map() -> FieldMap {
    FieldMap::new()
}

pub fn job_filter_spec() -> FilterSpec {
    FilterSpec::new()
        .rule("minSalary", "salary", FilterOp::Gte)
        .rule(HAS_EQUITY, "equity", FilterOp::Gt)
        .rule("title", "title", FilterOp::ILike)
}

/// Rewrite `hasEquity` to [`EQUITY_THRESHOLD`].
///
/// `hasEquity` is a gate, not a comparison value: whatever was supplied, its
/// presence asks for jobs with equity above zero. Key order is kept.
pub fn normalize_job_query(query: &QueryPayload) -> QueryPayload {
    let mut normalized = query.clone();
    if let Some(value) = normalized.get_mut(HAS_EQUITY) {
        *value = SqlValue::from(EQUITY_THRESHOLD);
    }
    normalized
}

/// [`build_where_clause`] over [`job_filter_spec`] after [`normalize_job_query`].
pub fn build_job_where_clause(query: &QueryPayload) -> Clause {
    build_where_clause(&normalize_job_query(query), &job_filter_spec())
}
