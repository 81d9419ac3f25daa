//! Projection and population planning for GraphQL-style selections over
//! document-database schemas whose fields reference other documents.
//!
//! See [`planner::orchestrator`] for the entry point.
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod planner;
pub mod utils;
