pub mod github;
pub mod info;
