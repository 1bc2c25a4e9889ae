use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

use crate::data::filter::{filter_rows_with, MatchMode};
use crate::data::path::row_key;
use crate::data::sort::{sort_view, SortState};

/// The derived view over a row snapshot: filter then sort, materialized as
/// indices into the snapshot plus the identifier key of each view row.
///
/// A view is immutable once built. Staleness is detected by a signature
/// hashed over everything the pipeline depends on: the snapshot reference
/// (a new `Arc` means "data changed"), the search term, the match mode, the
/// search fields, and the sort state. The pipeline re-runs only when one of
/// those actually changed.
#[derive(Debug, Clone, Default)]
pub struct GridView {
    indices: Vec<usize>,
    keys: Vec<String>,
    total: usize,
    signature: u64,
}

impl GridView {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Signature of the pipeline inputs.
    pub fn signature(
        rows: &Arc<Vec<Value>>,
        term: &str,
        fields: &[String],
        mode: MatchMode,
        sort: &SortState,
    ) -> u64 {
        let mut hasher = DefaultHasher::new();
        (Arc::as_ptr(rows) as usize).hash(&mut hasher);
        rows.len().hash(&mut hasher);
        term.hash(&mut hasher);
        fields.hash(&mut hasher);
        mode.hash(&mut hasher);
        sort.hash(&mut hasher);
        hasher.finish()
    }

    pub fn is_stale(&self, signature: u64) -> bool {
        self.signature != signature
    }

    /// Run the filter → sort pipeline and capture the result.
    pub fn rebuild(
        rows: &Arc<Vec<Value>>,
        term: &str,
        fields: &[String],
        mode: MatchMode,
        sort: &SortState,
        id_field: &str,
        signature: u64,
    ) -> Self {
        let mut indices = filter_rows_with(rows, term, fields, mode);
        sort_view(rows, &mut indices, sort);

        let keys = indices.iter().map(|&i| row_key(&rows[i], id_field)).collect();

        debug!(
            target: "view",
            "Rebuilt view: {} of {} rows (term={:?}, sort={:?})",
            indices.len(),
            rows.len(),
            term,
            sort.key
        );

        Self {
            indices,
            keys,
            total: rows.len(),
            signature,
        }
    }

    /// Indices into the row snapshot, in display order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Identifier keys of the view rows, in display order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of rows in the view.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of rows in the underlying snapshot.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Snapshot index of the row at a view position.
    pub fn row_at(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// Identifier key of the row at a view position.
    pub fn key_at(&self, position: usize) -> Option<&str> {
        self.keys.get(position).map(String::as_str)
    }
}
