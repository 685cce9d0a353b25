//! Declarative whitelists that drive clause generation.
//!
//! Column names and operators only ever come from these structures. Their
//! columns are `&'static str`, so a value read from a request cannot end up
//! interpolated as an identifier.

use indexmap::IndexMap;

/// Comparison operator of a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// Case-insensitive substring match; the value is bound as `%value%`.
    ILike,
}

impl FilterOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "!=",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::ILike => "ILIKE",
        }
    }

    /// Whether the bound value is wrapped as a substring pattern.
    pub fn is_pattern(self) -> bool {
        matches!(self, FilterOp::ILike)
    }
}

/// Target of one accepted filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRule {
    pub column: &'static str,
    pub op: FilterOp,
}

/// Whitelist of filterable query keys.
///
/// # Example
/// ```ignore
/// let spec = FilterSpec::new()
///     .rule("minEmployees", "num_employees", FilterOp::Gte)
///     .rule("nameLike", "name", FilterOp::ILike);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    rules: IndexMap<&'static str, FilterRule>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `key`, filtering `column` with `op`. A repeated key replaces the earlier rule.
    ///
    /// # Panics
    ///
    /// If `column` is not a plain SQL identifier. Specs are declared in code,
    /// so a bad column is a programming error and fails on first construction.
    pub fn rule(mut self, key: &'static str, column: &'static str, op: FilterOp) -> Self {
        assert!(
            crate::ident::is_valid(column),
            "FilterSpec column '{column}' is not a valid identifier"
        );
        self.rules.insert(key, FilterRule { column, op });
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterRule> {
        self.rules.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    /// Accepted keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }
}

/// Logical field name to column name mapping for partial updates.
///
/// Fields without an entry map to a column of the same name.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    columns: IndexMap<&'static str, &'static str>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(mut self, field: &'static str, column: &'static str) -> Self {
        self.columns.insert(field, column);
        self
    }

    /// Column for `field`, falling back to the field name itself.
    pub fn column_for<'a>(&self, field: &'a str) -> &'a str {
        match self.columns.get(field) {
            Some(column) => *column,
            None => field,
        }
    }
}

impl FromIterator<(&'static str, &'static str)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (&'static str, &'static str)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
