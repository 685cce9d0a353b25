//! Filter companies and patch a job through a pooled connection.
//!
//! Run with: `DATABASE_URL=postgres://... cargo run --example company_search -p jobly`

use jobly::{Company, Job, JoblyConfig, JoblyResult, QueryPayload, create_pool};

#[tokio::main]
async fn main() -> JoblyResult<()> {
    let config = JoblyConfig::from_env()?;
    let pool = create_pool(&config)?;
    let client = pool.get().await?;

    let query: QueryPayload =
        serde_json::from_str(r#"{"minEmployees": 100, "nameLike": "corp", "page": 2}"#)
            .map_err(|e| jobly::JoblyError::invalid_input(e.to_string()))?;
    for company in Company::find_all(&client, &query).await? {
        println!("{:<25} {:?}", company.handle, company.num_employees);
    }

    let with_equity: QueryPayload = serde_json::from_str(r#"{"hasEquity": true}"#)
        .map_err(|e| jobly::JoblyError::invalid_input(e.to_string()))?;
    let jobs = Job::find_all(&client, &with_equity).await?;
    println!("{} jobs offer equity", jobs.len());

    Ok(())
}
