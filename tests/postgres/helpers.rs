//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use eyre::WrapErr;
use mockable::DefaultClock;
use taskboard::{
    postgres::build_pool,
    tracker::{Tracker, TrackerStores},
};
use tracing::warn;
use uuid::Uuid;

/// Variable naming the server used by these tests.
pub const TEST_DATABASE_URL_ENV: &str = "TASKBOARD_TEST_DATABASE_URL";

/// SQL creating the tracker tables.
pub const CREATE_TABLES_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_tracker_tables/up.sql");

/// A migrated, throwaway schema and a tracker bound to it.
pub struct IsolatedSchema {
    admin_url: String,
    schema: String,
    /// Tracker whose pooled connections resolve tables in the schema.
    pub tracker: Tracker,
}

impl Drop for IsolatedSchema {
    fn drop(&mut self) {
        let outcome = PgConnection::establish(&self.admin_url)
            .map_err(|err| err.to_string())
            .and_then(|mut conn| {
                conn.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
                    .map_err(|err| err.to_string())
            });
        if let Err(err) = outcome {
            warn!(schema = %self.schema, error = %err, "failed to drop test schema");
        }
    }
}

/// Returns the configured test database URL, if any.
#[must_use]
pub fn test_database_url() -> Option<String> {
    std::env::var(TEST_DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Creates and migrates a fresh schema, or returns `None` when no test
/// database is configured.
///
/// # Errors
///
/// Returns an error if the server is unreachable or the migration fails.
pub fn isolated_schema() -> eyre::Result<Option<IsolatedSchema>> {
    let Some(admin_url) = test_database_url() else {
        return Ok(None);
    };
    let schema = format!("taskboard_test_{}", Uuid::new_v4().simple());

    let mut conn = PgConnection::establish(&admin_url).wrap_err("connect to test database")?;
    conn.batch_execute(&format!("CREATE SCHEMA {schema}; SET search_path TO {schema};"))
        .wrap_err("create test schema")?;
    conn.batch_execute(CREATE_TABLES_SQL)
        .wrap_err("apply tracker migration")?;

    let pool = build_pool(&scoped_url(&admin_url, &schema), 2).wrap_err("build pool")?;
    let tracker = Tracker::new(TrackerStores::postgres(&pool), Arc::new(DefaultClock));
    Ok(Some(IsolatedSchema {
        admin_url,
        schema,
        tracker,
    }))
}

fn scoped_url(url: &str, schema: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}options=-csearch_path%3D{schema}")
}
