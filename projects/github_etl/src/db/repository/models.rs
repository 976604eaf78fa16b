use chrono::{DateTime, Utc};
use diesel::prelude::*;
use interfaces_github_search::models::RepositoryRecord;
use serde::Serialize;

use crate::db::schema::repositories;

/// A row of the `repositories` table, keyed by `full_name`.
///
/// The same struct is used for reads, inserts and in-place updates so the
/// column list cannot drift between them.
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = repositories)]
#[diesel(primary_key(full_name))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoredRepository {
    pub full_name: String,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub stargazers_count: Option<i64>,
    pub watchers_count: Option<i64>,
    pub forks_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub html_url: Option<String>,
    pub language: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl StoredRepository {
    /// Builds a fresh row from an upstream record.
    ///
    /// Returns `None` when the record has no `full_name` to key on.
    pub fn from_record(record: &RepositoryRecord, fetched_at: DateTime<Utc>) -> Option<Self> {
        let full_name = record.full_name.clone()?;

        Some(Self {
            full_name,
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            stargazers_count: record.stargazers_count,
            watchers_count: record.watchers_count,
            forks_count: record.forks_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
            html_url: record.html_url.clone(),
            language: record.language.clone(),
            fetched_at,
        })
    }

    /// Replaces every column with the record's value, `None` included, then
    /// stamps `fetched_at`. The last sighting wins.
    pub fn merge_record(&mut self, record: &RepositoryRecord, fetched_at: DateTime<Utc>) {
        self.id = record.id;
        self.name = record.name.clone();
        self.description = record.description.clone();
        self.stargazers_count = record.stargazers_count;
        self.watchers_count = record.watchers_count;
        self.forks_count = record.forks_count;
        self.created_at = record.created_at;
        self.updated_at = record.updated_at;
        self.html_url = record.html_url.clone();
        self.language = record.language.clone();
        self.fetched_at = fetched_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(full_name: &str, stars: i64) -> RepositoryRecord {
        RepositoryRecord {
            id: Some(1),
            name: Some("b".to_string()),
            full_name: Some(full_name.to_string()),
            description: Some("first".to_string()),
            stargazers_count: Some(stars),
            language: Some("Rust".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn from_record_requires_full_name() {
        let now = Utc::now();
        let anonymous = RepositoryRecord {
            id: Some(7),
            ..Default::default()
        };

        assert!(StoredRepository::from_record(&anonymous, now).is_none());
    }

    #[test]
    fn from_record_copies_every_column() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let incoming = RepositoryRecord {
            id: Some(42),
            name: Some("b".to_string()),
            full_name: Some("a/b".to_string()),
            description: Some("desc".to_string()),
            stargazers_count: Some(10),
            watchers_count: Some(11),
            forks_count: Some(12),
            created_at: Some(created),
            updated_at: Some(now),
            html_url: Some("https://github.com/a/b".to_string()),
            language: Some("Rust".to_string()),
        };

        let row = StoredRepository::from_record(&incoming, now).unwrap();

        assert_eq!(row.full_name, "a/b");
        assert_eq!(row.id, Some(42));
        assert_eq!(row.name.as_deref(), Some("b"));
        assert_eq!(row.description.as_deref(), Some("desc"));
        assert_eq!(row.stargazers_count, Some(10));
        assert_eq!(row.watchers_count, Some(11));
        assert_eq!(row.forks_count, Some(12));
        assert_eq!(row.created_at, Some(created));
        assert_eq!(row.updated_at, Some(now));
        assert_eq!(row.html_url.as_deref(), Some("https://github.com/a/b"));
        assert_eq!(row.language.as_deref(), Some("Rust"));
        assert_eq!(row.fetched_at, now);
    }

    #[test]
    fn merge_overwrites_fields_and_advances_fetched_at() {
        let first_seen = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let second_seen = first_seen + Duration::minutes(5);

        let mut row = StoredRepository::from_record(&record("a/b", 100), first_seen).unwrap();

        let mut update = record("a/b", 250);
        update.description = Some("second".to_string());
        row.merge_record(&update, second_seen);

        assert_eq!(row.stargazers_count, Some(250));
        assert_eq!(row.description.as_deref(), Some("second"));
        assert_eq!(row.fetched_at, second_seen);
        assert!(row.fetched_at > first_seen);
    }

    #[test]
    fn merge_clears_columns_the_record_leaves_empty() {
        let now = Utc::now();
        let mut row = StoredRepository::from_record(&record("a/b", 100), now).unwrap();

        let sparse = RepositoryRecord {
            full_name: Some("a/b".to_string()),
            forks_count: Some(3),
            ..Default::default()
        };
        row.merge_record(&sparse, now);

        assert_eq!(row.forks_count, Some(3));
        assert_eq!(row.stargazers_count, None);
        assert_eq!(row.language, None);
        assert_eq!(row.name, None);
    }

    #[test]
    fn explicit_null_from_upstream_clears_stored_value() {
        let now = Utc::now();
        let mut seeded = record("a/b", 100);
        seeded.description = Some("old".to_string());
        let mut row = StoredRepository::from_record(&seeded, now).unwrap();

        let incoming: RepositoryRecord = serde_json::from_str(
            r#"{"full_name":"a/b","description":null,"language":null,"stargazers_count":120}"#,
        )
        .unwrap();
        row.merge_record(&incoming, now);

        assert_eq!(row.description, None);
        assert_eq!(row.language, None);
        assert_eq!(row.stargazers_count, Some(120));
        assert_eq!(row.full_name, "a/b");
    }
}
