//! GitHub repository search service
//!
//! - REST API endpoints in `endpoints/`, wired together in `app`
//! - GitHub search client in `github/`
//! - PostgreSQL models, queries and the best-effort store in `db/`
//! - Settings come from the environment (see `config`)

pub mod app;
pub mod config;
pub mod db;
pub mod endpoints;
pub mod github;
