//! Traits describing where bin records come from, and their errors.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::model::{BinId, BinRecord};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
/// Errors that can occur while loading bins from a source.
pub enum SourceError {
    /// Two records share the same identifier.
    #[error("Duplicate bin id: {0}")]
    DuplicateBinId(BinId),
    /// The source produced no bins at all.
    #[error("Source {0} has no bins")]
    Empty(String),
}

#[async_trait]
/// Backend that provides the initial set of bins for a session.
pub trait BinSource: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Load the bins to monitor, in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the source cannot produce bins.
    async fn load(&self) -> Result<Vec<BinRecord>, SourceError>;
}

/// Reject collections that reuse a bin id.
///
/// # Errors
///
/// Returns [`SourceError::DuplicateBinId`] naming the first repeated id.
pub fn ensure_unique_ids(bins: &[BinRecord]) -> Result<(), SourceError> {
    let mut seen = HashSet::with_capacity(bins.len());
    for bin in bins {
        if !seen.insert(bin.id()) {
            return Err(SourceError::DuplicateBinId(bin.id().clone()));
        }
    }
    Ok(())
}
