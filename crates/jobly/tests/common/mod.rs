#![allow(dead_code)]

/// Connect using `DATABASE_URL`; `None` skips the calling test.
pub async fn try_connect() -> Option<tokio_postgres::Client> {
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let (client, connection) = tokio_postgres::connect(&database_url, tokio_postgres::NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    Some(client)
}

/// Create session-local tables shadowing `companies`/`jobs` and load fixtures.
///
/// Run inside a transaction and roll back: nothing outlives the test.
pub async fn seed(tx: &tokio_postgres::Transaction<'_>) -> Vec<i32> {
    tx.batch_execute(
        r#"
        CREATE TEMP TABLE companies (
            handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
            name TEXT UNIQUE NOT NULL,
            num_employees INTEGER CHECK (num_employees >= 0),
            description TEXT NOT NULL,
            logo_url TEXT
        ) ON COMMIT DROP;

        CREATE TEMP TABLE jobs (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            salary INTEGER CHECK (salary >= 0),
            equity NUMERIC CHECK (equity <= 1.0),
            company_handle VARCHAR(25) NOT NULL REFERENCES companies ON DELETE CASCADE
        ) ON COMMIT DROP;

        INSERT INTO companies (handle, name, num_employees, description, logo_url)
        VALUES ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
               ('c2', 'C2', 2, 'Desc2', 'http://c2.img'),
               ('c3', 'C3', 3, 'Desc3', 'http://c3.img');

        INSERT INTO jobs (title, salary, equity, company_handle)
        VALUES ('Job1', 1000, '0.1', 'c1'),
               ('Job2', 2000, '0.2', 'c1'),
               ('Job3', 3000, '0', 'c1'),
               ('Job4', NULL, NULL, 'c1');
        "#,
    )
    .await
    .expect("seed fixtures");

    tx.query("SELECT id FROM jobs ORDER BY title", &[])
        .await
        .expect("load job ids")
        .iter()
        .map(|row| row.get::<_, i32>("id"))
        .collect()
}

pub fn payload(json: &str) -> jobly::QueryPayload {
    serde_json::from_str(json).expect("valid payload json")
}
