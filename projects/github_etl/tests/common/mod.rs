#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use interfaces_github_search::models::RepositoryRecord;
use projects_github_etl::{
    app::{router, AppInfo, AppState},
    config::GitHubConfig,
    db::{
        repository::{
            models::StoredRepository,
            queries::{UpsertOutcome, UpsertRepositoryError},
        },
        store::{PersistenceError, RepositoryStore},
    },
    github::search::GitHubSearchClient,
};

/// In-process store with the same merge rules as the PostgreSQL one.
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<BTreeMap<String, StoredRepository>>>,
}

impl MemoryStore {
    pub fn rows(&self) -> Vec<StoredRepository> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    /// Polls until `done` holds for the stored rows; writes land after the
    /// response is sent.
    pub async fn wait_until<F>(&self, done: F) -> Vec<StoredRepository>
    where
        F: Fn(&[StoredRepository]) -> bool,
    {
        for _ in 0..200 {
            let rows = self.rows();
            if done(&rows) {
                return rows;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("store never reached the expected state: {:?}", self.rows());
    }
}

impl RepositoryStore for MemoryStore {
    fn upsert(&self, record: &RepositoryRecord) -> Result<UpsertOutcome, PersistenceError> {
        let now = Utc::now();
        let mut rows = self.rows.lock().unwrap();
        let key = record
            .full_name
            .clone()
            .ok_or(UpsertRepositoryError::MissingFullName)?;

        if let Some(row) = rows.get_mut(&key) {
            row.merge_record(record, now);
            return Ok(UpsertOutcome::Updated);
        }

        let row = StoredRepository::from_record(record, now)
            .ok_or(UpsertRepositoryError::MissingFullName)?;
        rows.insert(key, row);
        Ok(UpsertOutcome::Inserted)
    }

    fn find_by_full_name(
        &self,
        full_name: &str,
    ) -> Result<Option<StoredRepository>, PersistenceError> {
        Ok(self.rows.lock().unwrap().get(full_name).cloned())
    }
}

pub fn state(api_base: &str, store: Option<Arc<dyn RepositoryStore>>) -> AppState {
    let github = GitHubSearchClient::new(GitHubConfig {
        api_base: api_base.to_string(),
        ..GitHubConfig::default()
    })
    .unwrap();

    AppState {
        github,
        store,
        info: AppInfo {
            name: "GitHub ETL".to_string(),
            version: "test-0000000".to_string(),
        },
    }
}

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    format!("http://{addr}")
}
