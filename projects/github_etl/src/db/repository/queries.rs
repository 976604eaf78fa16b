use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use interfaces_github_search::models::RepositoryRecord;
use tracing::debug;

use crate::db::{
    repository::models::*,
    schema::repositories::dsl::{full_name, repositories},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

#[derive(Debug, thiserror::Error)]
pub enum UpsertRepositoryError {
    #[error("MissingFullName: record has no full_name to key on")]
    MissingFullName,

    #[error("UpsertRepository: {source}")]
    UpsertRepository {
        #[from]
        source: diesel::result::Error,
    },
}

/// Inserts the record or merges it into the row with the same `full_name`,
/// in one transaction.
///
/// The insert carries `ON CONFLICT (full_name) DO UPDATE`, so a concurrent
/// first sighting of the same name turns into an overwrite instead of a
/// unique violation. The outcome then still reads `Inserted`.
///
/// With `echo` set the issued SQL is logged at debug level.
pub fn upsert_repository(
    conn: &mut PgConnection,
    record: &RepositoryRecord,
    now: DateTime<Utc>,
    echo: bool,
) -> Result<UpsertOutcome, UpsertRepositoryError> {
    let full_name_val = record
        .full_name
        .as_deref()
        .ok_or(UpsertRepositoryError::MissingFullName)?;

    conn.transaction::<_, UpsertRepositoryError, _>(|conn| {
        let existing = repositories
            .filter(full_name.eq(full_name_val))
            .select(StoredRepository::as_select())
            .for_update()
            .first::<StoredRepository>(conn)
            .optional()?;

        match existing {
            Some(mut row) => {
                row.merge_record(record, now);
                let stmt = diesel::update(&row).set(&row);
                if echo {
                    debug!(sql = %diesel::debug_query::<Pg, _>(&stmt), "upsert");
                }
                stmt.execute(conn)?;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                let row = StoredRepository::from_record(record, now)
                    .ok_or(UpsertRepositoryError::MissingFullName)?;
                insert_or_overwrite(conn, &row, echo)?;
                Ok(UpsertOutcome::Inserted)
            }
        }
    })
}

/// `INSERT ... ON CONFLICT (full_name) DO UPDATE` with every column of `row`.
pub fn insert_or_overwrite(
    conn: &mut PgConnection,
    row: &StoredRepository,
    echo: bool,
) -> QueryResult<usize> {
    let stmt = diesel::insert_into(repositories)
        .values(row)
        .on_conflict(full_name)
        .do_update()
        .set(row);
    if echo {
        debug!(sql = %diesel::debug_query::<Pg, _>(&stmt), "upsert");
    }
    stmt.execute(conn)
}

#[derive(Debug, thiserror::Error)]
pub enum GetRepositoryByFullNameError {
    #[error("GetRepositoryByFullName: {source}")]
    GetRepositoryByFullName {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_repository_by_full_name(
    conn: &mut PgConnection,
    full_name_val: &str,
) -> Result<Option<StoredRepository>, GetRepositoryByFullNameError> {
    repositories
        .filter(full_name.eq(full_name_val))
        .select(StoredRepository::as_select())
        .first::<StoredRepository>(conn)
        .optional()
        .map_err(|source| GetRepositoryByFullNameError::GetRepositoryByFullName { source })
}
