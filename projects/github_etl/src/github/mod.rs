//! Typed access to the GitHub search API

pub mod search;
