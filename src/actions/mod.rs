//! File actions module.
//!
//! Currently a single action: eliminating duplicates from a scanned set
//! while preserving one keeper per group. See [`delete`].

pub mod delete;

pub use delete::{delete_duplicates, DeleteConfig, DeleteError, DeleteReport, KeepPolicy};
