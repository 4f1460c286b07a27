//! The contract every data source fulfils.

use std::future::Future;

use profint_core::{Post, Profile, RelationshipSet};

use crate::error::SourceError;

/// Supplies the raw material for one run.
///
/// - `fetch_profile` fails with [`SourceError::NotFound`] when the identifier
///   does not resolve; any other error is also fatal to the run.
/// - `fetch_relationships` and `fetch_posts` report every failure as
///   [`SourceError::Unavailable`]; the pipeline degrades those sections instead
///   of aborting.
/// - `fetch_posts` returns at most `limit` posts, newest first.
pub trait DataSource {
    fn fetch_profile(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Profile, SourceError>> + Send;

    fn fetch_relationships(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<RelationshipSet, SourceError>> + Send;

    fn fetch_posts(
        &self,
        identifier: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Post>, SourceError>> + Send;
}
