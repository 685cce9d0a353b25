//! Company and job records and their data access.
//!
//! Repository functions are associated functions taking `&impl GenericClient`,
//! so they run the same on a client, a pooled client or a transaction.

pub mod company;
pub mod job;

pub use company::{Company, CompanyJob, CompanyWithJobs, NewCompany};
pub use job::{Job, JobDetail, JobListing, NewJob};

use crate::clause::UpdatePayload;
use crate::error::{JoblyError, JoblyResult};

/// Reject payload fields outside `allowed`.
///
/// Runs before clause building so that an unmapped field never reaches the
/// identity fallback of the field map.
pub(crate) fn ensure_updatable(data: &UpdatePayload, allowed: &[&str]) -> JoblyResult<()> {
    match data.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(field) => Err(JoblyError::invalid_input(format!(
            "Field cannot be updated: {field}"
        ))),
        None => Ok(()),
    }
}
