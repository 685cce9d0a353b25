//! Typed scalar values bound as positional parameters.
//!
//! Payloads arrive as JSON bodies or query strings, so a [`SqlValue`] keeps the
//! type it was given and defers the conversion to the column's Postgres type
//! until bind time. Text is parsed when it is bound against a numeric or
//! boolean column; everything else converts without loss or fails loudly.

use bytes::BytesMut;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

type BoxError = Box<dyn Error + Sync + Send>;

/// A scalar field or filter value.
///
/// Deserializes untagged from JSON: integers stay [`SqlValue::Int`], other
/// numbers become [`SqlValue::Float`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Whether the value carries something to filter on.
    ///
    /// `Null` and the empty string are absent. `0` and `false` are present:
    /// they are legitimate filter values and must not be dropped.
    pub fn is_present(&self) -> bool {
        match self {
            SqlValue::Null => false,
            SqlValue::Text(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Numeric view of the value, parsing text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Int(i) => Some(*i as f64),
            SqlValue::Float(x) => Some(*x),
            SqlValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Wrap the value as a `%value%` substring pattern.
    pub fn to_contains_pattern(&self) -> SqlValue {
        SqlValue::Text(format!("%{self}%"))
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => Ok(()),
            SqlValue::Bool(b) => write!(f, "{b}"),
            SqlValue::Int(i) => write!(f, "{i}"),
            SqlValue::Float(x) => write!(f, "{x}"),
            SqlValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for SqlValue {
    type Error = crate::error::JoblyError;

    /// Arrays and objects are not scalars and are rejected.
    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(v)
            .map_err(|e| crate::error::JoblyError::invalid_input(format!("Expected a scalar: {e}")))
    }
}

fn is_text(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN
    )
}

fn mismatch(value: &SqlValue, ty: &Type) -> BoxError {
    format!("cannot bind {value:?} to a column of type {ty}").into()
}

fn bind_int(i: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(i)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(i)?.to_sql(ty, out),
        Type::INT8 => i.to_sql(ty, out),
        Type::FLOAT4 => (i as f32).to_sql(ty, out),
        Type::FLOAT8 => (i as f64).to_sql(ty, out),
        Type::NUMERIC => Decimal::from(i).to_sql(ty, out),
        _ if is_text(ty) => i.to_string().as_str().to_sql(ty, out),
        _ => Err(mismatch(&SqlValue::Int(i), ty)),
    }
}

/// `100.0` is accepted as `100`; a fractional part or an out-of-range value is not.
fn integral(x: f64) -> Result<i64, BoxError> {
    if x.fract() != 0.0 || x < i64::MIN as f64 || x >= i64::MAX as f64 {
        return Err(format!("{x} is not an integer").into());
    }
    Ok(x as i64)
}

fn bind_float(x: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 | Type::INT4 | Type::INT8 => bind_int(integral(x)?, ty, out),
        Type::FLOAT4 => (x as f32).to_sql(ty, out),
        Type::FLOAT8 => x.to_sql(ty, out),
        Type::NUMERIC => Decimal::try_from(x)?.to_sql(ty, out),
        _ if is_text(ty) => x.to_string().as_str().to_sql(ty, out),
        _ => Err(mismatch(&SqlValue::Float(x), ty)),
    }
}

fn bind_text(s: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::BOOL => s.trim().parse::<bool>()?.to_sql(ty, out),
        Type::INT2 | Type::INT4 | Type::INT8 => bind_int(s.trim().parse::<i64>()?, ty, out),
        Type::FLOAT4 | Type::FLOAT8 => bind_float(s.trim().parse::<f64>()?, ty, out),
        Type::NUMERIC => Decimal::from_str(s.trim())?.to_sql(ty, out),
        _ if is_text(ty) => s.to_sql(ty, out),
        _ => Err(mismatch(&SqlValue::Text(s.to_string()), ty)),
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self {
            SqlValue::Null => Ok(IsNull::Yes),
            SqlValue::Bool(b) => match *ty {
                Type::BOOL => b.to_sql(ty, out),
                _ if is_text(ty) => b.to_string().as_str().to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            SqlValue::Int(i) => bind_int(*i, ty, out),
            SqlValue::Float(x) => bind_float(*x, ty, out),
            SqlValue::Text(s) => bind_text(s, ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::BOOL
                | Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::NUMERIC
        ) || is_text(ty)
    }

    to_sql_checked!();
}
