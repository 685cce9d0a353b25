//! `jobs` table.

use super::{Company, ensure_updatable};
use crate::client::GenericClient;
use crate::clause::{
    QueryPayload, UpdatePayload, build_job_where_clause, build_set_clause, job_field_map,
};
use crate::error::{JoblyError, JoblyResult};
use crate::row::{FromRow, RowExt, map_rows};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const COLUMNS: &str = "id, title, salary, equity, company_handle";

const UPDATABLE: &[&str] = &["title", "salary", "equity"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &tokio_postgres::Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Input for [`Job::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A job row from [`Job::find_all`], with its company's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub company_name: Option<String>,
}

impl FromRow for JobListing {
    fn from_row(row: &tokio_postgres::Row) -> JoblyResult<Self> {
        Ok(Self {
            job: Job::from_row(row)?,
            company_name: row.try_get_column("company_name")?,
        })
    }
}

/// A job with its company embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

impl FromRow for JobDetail {
    fn from_row(row: &tokio_postgres::Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company: Company::from_row(row)?,
        })
    }
}

impl Job {
    pub async fn create(conn: &impl GenericClient, data: &NewJob) -> JoblyResult<Job> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let row = conn
            .query_one(
                &sql,
                &[&data.title, &data.salary, &data.equity, &data.company_handle],
            )
            .await?;

        let job = Job::from_row(&row)?;
        tracing::debug!(target: "jobly.models", id = job.id, "job created");
        Ok(job)
    }

    /// All jobs accepted by `query`, ordered by title.
    ///
    /// Accepted keys: `minSalary`, `hasEquity` (any value asks for equity above
    /// zero), `title` (case-insensitive substring). Other keys are ignored.
    pub async fn find_all(
        conn: &impl GenericClient,
        query: &QueryPayload,
    ) -> JoblyResult<Vec<JobListing>> {
        let filter = build_job_where_clause(query);
        let sql = format!(
            "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, c.name AS company_name \
             FROM jobs j \
             LEFT JOIN companies AS c ON c.handle = j.company_handle \
             {} \
             ORDER BY title",
            filter.sql
        );
        let rows = conn.query(&sql, &filter.params()).await?;
        map_rows(&rows)
    }

    pub async fn get(conn: &impl GenericClient, id: i32) -> JoblyResult<JobDetail> {
        let row = conn
            .query_opt(
                "SELECT j.id, j.title, j.salary, j.equity, \
                        c.handle, c.name, c.description, c.num_employees, c.logo_url \
                 FROM jobs j \
                 JOIN companies AS c ON c.handle = j.company_handle \
                 WHERE j.id = $1",
                &[&id],
            )
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No job: {id}")))?;
        JobDetail::from_row(&row)
    }

    /// Partial update: only the supplied fields change.
    ///
    /// Updatable fields: `title`, `salary`, `equity`. A job cannot move to another
    /// company and its id never changes.
    pub async fn update(
        conn: &impl GenericClient,
        id: i32,
        data: &UpdatePayload,
    ) -> JoblyResult<Job> {
        ensure_updatable(data, UPDATABLE)?;

        let set = build_set_clause(data, &job_field_map())?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {COLUMNS}",
            set.sql,
            set.next_placeholder()
        );
        let mut params = set.params();
        params.push(&id);

        let row = conn
            .query_opt(&sql, &params)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No job: {id}")))?;

        tracing::debug!(target: "jobly.models", id, fields = data.len(), "job updated");
        Job::from_row(&row)
    }

    pub async fn remove(conn: &impl GenericClient, id: i32) -> JoblyResult<()> {
        let deleted = conn
            .execute("DELETE FROM jobs WHERE id = $1", &[&id])
            .await?;
        if deleted == 0 {
            return Err(JoblyError::not_found(format!("No job: {id}")));
        }

        tracing::debug!(target: "jobly.models", id, "job removed");
        Ok(())
    }
}
