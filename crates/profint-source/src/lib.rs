//! Data sources for profint.
//!
//! A [`DataSource`] hands the pipeline typed [`profint_core::Profile`],
//! [`profint_core::RelationshipSet`] and [`profint_core::Post`] values. Raw
//! records are mapped to those types in [`ingest`], so nothing downstream sees
//! the loose shapes sources actually return.

pub mod error;
pub mod http;
pub mod ingest;
pub mod raw;
pub mod snapshot;
pub mod source;

mod retry;

pub use error::{Resource, SourceError};
pub use http::HttpSource;
pub use snapshot::SnapshotSource;
pub use source::DataSource;
