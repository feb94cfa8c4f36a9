//! Search over persisted vector indexes.
//!
//! Queries are embedded with the model recorded in the index metadata
//! and ranked by cosine similarity.

mod service;

pub use service::SearchService;
