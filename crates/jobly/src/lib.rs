//! # jobly
//!
//! Companies and jobs records over PostgreSQL.
//!
//! The interesting part is [`clause`]: it turns a sparse update payload into a
//! `SET` fragment and a query object into a `WHERE` fragment, each with
//! `$1, $2, ...` placeholders and the ordered values to bind. Column names and
//! operators come only from statically declared whitelists ([`FieldMap`],
//! [`FilterSpec`]); request data is only ever bound as a parameter.
//!
//! ```ignore
//! use jobly::{Company, Job, QueryPayload};
//!
//! let query: QueryPayload = serde_json::from_str(r#"{"minEmployees": 100, "nameLike": "ibm"}"#)?;
//! let companies = Company::find_all(&client, &query).await?;
//!
//! let patch = serde_json::from_str(r#"{"salary": 120000}"#)?;
//! let job = Job::update(&client, 42, &patch).await?;
//! ```

pub mod clause;
pub mod client;
pub mod config;
pub mod error;
pub mod ident;
pub mod models;
pub mod row;
pub mod value;

pub use clause::{
    Clause, FieldMap, FilterOp, FilterRule, FilterSpec, QueryPayload, UpdatePayload,
    build_job_where_clause, build_set_clause, build_where_clause,
};
pub use client::GenericClient;
pub use config::JoblyConfig;
pub use error::{JoblyError, JoblyResult};
pub use models::{
    Company, CompanyJob, CompanyWithJobs, Job, JobDetail, JobListing, NewCompany, NewJob,
};
pub use row::{FromRow, RowExt};
pub use value::SqlValue;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::create_pool;
