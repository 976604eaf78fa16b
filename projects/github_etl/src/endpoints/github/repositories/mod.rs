pub mod read;
pub mod search;
