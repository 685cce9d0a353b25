//! `companies` table.

use super::ensure_updatable;
use crate::client::GenericClient;
use crate::clause::{
    QueryPayload, UpdatePayload, build_set_clause, build_where_clause, company_field_map,
    company_filter_spec,
};
use crate::error::{JoblyError, JoblyResult};
use crate::row::{FromRow, RowExt, map_rows};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

const UPDATABLE: &[&str] = &["name", "description", "numEmployees", "logoUrl"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &tokio_postgres::Row) -> JoblyResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// Input for [`Company::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A job as listed under its company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl FromRow for CompanyJob {
    fn from_row(row: &tokio_postgres::Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyWithJobs {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

/// `minEmployees` above `maxEmployees` can never match and is rejected.
pub(crate) fn check_employee_range(query: &QueryPayload) -> JoblyResult<()> {
    let bound = |key: &str| {
        query
            .get(key)
            .filter(|v| v.is_present())
            .and_then(|v| v.as_f64())
    };

    if let (Some(min), Some(max)) = (bound("minEmployees"), bound("maxEmployees")) {
        if min > max {
            return Err(JoblyError::invalid_input(format!(
                "minEmployees ({min}) cannot be greater than maxEmployees ({max})"
            )));
        }
    }
    Ok(())
}

impl Company {
    /// Insert a company.
    ///
    /// # Errors
    /// [`JoblyError::InvalidInput`] if the handle is already taken.
    pub async fn create(conn: &impl GenericClient, data: &NewCompany) -> JoblyResult<Company> {
        let duplicate = conn
            .query_opt(
                "SELECT handle FROM companies WHERE handle = $1",
                &[&data.handle],
            )
            .await?;
        if duplicate.is_some() {
            return Err(JoblyError::invalid_input(format!(
                "Duplicate company: {}",
                data.handle
            )));
        }

        let sql = format!(
            "INSERT INTO companies ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        );
        let row = conn
            .query_one(
                &sql,
                &[
                    &data.handle,
                    &data.name,
                    &data.description,
                    &data.num_employees,
                    &data.logo_url,
                ],
            )
            .await?;

        tracing::debug!(target: "jobly.models", handle = %data.handle, "company created");
        Company::from_row(&row)
    }

    /// All companies accepted by `query`, ordered by name.
    ///
    /// Accepted keys: `minEmployees`, `maxEmployees`, `nameLike` (case-insensitive
    /// substring). Other keys are ignored; without any, every company is returned.
    pub async fn find_all(
        conn: &impl GenericClient,
        query: &QueryPayload,
    ) -> JoblyResult<Vec<Company>> {
        check_employee_range(query)?;

        let filter = build_where_clause(query, &company_filter_spec());
        let sql = format!(
            "SELECT {COLUMNS} FROM companies {} ORDER BY name",
            filter.sql
        );
        let rows = conn.query(&sql, &filter.params()).await?;
        map_rows(&rows)
    }

    /// A company with its jobs ordered by id.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> JoblyResult<CompanyWithJobs> {
        let sql = format!("SELECT {COLUMNS} FROM companies WHERE handle = $1");
        let row = conn
            .query_opt(&sql, &[&handle])
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No company: {handle}")))?;
        let company = Company::from_row(&row)?;

        let rows = conn
            .query(
                "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
                &[&handle],
            )
            .await?;

        Ok(CompanyWithJobs {
            company,
            jobs: map_rows(&rows)?,
        })
    }

    /// Partial update: only the supplied fields change.
    ///
    /// Updatable fields: `name`, `description`, `numEmployees`, `logoUrl`.
    pub async fn update(
        conn: &impl GenericClient,
        handle: &str,
        data: &UpdatePayload,
    ) -> JoblyResult<Company> {
        ensure_updatable(data, UPDATABLE)?;

        let set = build_set_clause(data, &company_field_map())?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {COLUMNS}",
            set.sql,
            set.next_placeholder()
        );
        let mut params = set.params();
        params.push(&handle);

        let row = conn
            .query_opt(&sql, &params)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No company: {handle}")))?;

        tracing::debug!(target: "jobly.models", handle, fields = data.len(), "company updated");
        Company::from_row(&row)
    }

    /// Delete a company (and, by cascade, its jobs).
    pub async fn remove(conn: &impl GenericClient, handle: &str) -> JoblyResult<()> {
        let deleted = conn
            .execute("DELETE FROM companies WHERE handle = $1", &[&handle])
            .await?;
        if deleted == 0 {
            return Err(JoblyError::not_found(format!("No company: {handle}")));
        }

        tracing::debug!(target: "jobly.models", handle, "company removed");
        Ok(())
    }
}
