//! GitHub repository search over the REST API
//!
//! - `index`: the raw `GET /search/repositories` call
//! - `models`: wire types for the search envelope and its items

pub mod index;
pub mod models;
