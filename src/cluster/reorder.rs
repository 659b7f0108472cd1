//! Dendrogram-ordered row reordering.
//!
//! Turns a raw [`Dataset`] into one whose rows follow the leaf order of its
//! hierarchical clustering, ready to be drawn as a heat map with the
//! dendrogram alongside:
//!
//! 1. condensed pairwise distances over the coordinates
//! 2. agglomerative linkage (`n - 1` merges)
//! 3. leaf order by depth-first traversal of the merge tree
//! 4. the same permutation applied to coordinates and labels
//! 5. merge heights rescaled to `log2(h + 0.1)`, shifted to start at zero
//!
//! The input is never modified.

use super::hierarchical::{HierarchicalClustering, Linkage, Metric};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::hierarchy::LeafOrdering;

/// Options for [`reorder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderConfig {
    /// Linkage method (default Ward).
    pub linkage: Linkage,
    /// Distance metric (default Euclidean).
    pub metric: Metric,
    /// Sibling visit rule for the leaf order.
    pub leaf_ordering: LeafOrdering,
}

impl ReorderConfig {
    /// Ward linkage, Euclidean distances, merge-order leaves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set linkage method.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Set distance metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set leaf ordering.
    pub fn with_leaf_ordering(mut self, ordering: LeafOrdering) -> Self {
        self.leaf_ordering = ordering;
        self
    }
}

/// Cluster `dataset` and return a copy reordered to its dendrogram.
///
/// The returned dataset carries the rescaled linkage and the leaf order
/// (original row index per output row).
///
/// # Errors
///
/// [`crate::Error::DegenerateInput`] for fewer than two rows or non-finite
/// data; [`crate::Error::Configuration`] for a linkage/metric pair that is
/// not defined.
pub fn reorder(dataset: &Dataset, config: &ReorderConfig) -> Result<Dataset> {
    let dendro = HierarchicalClustering::new()
        .with_linkage(config.linkage)
        .with_metric(config.metric)
        .fit_dendrogram(dataset.coordinates().view())?;

    let order = dendro.leaf_order(config.leaf_ordering)?;
    let rescaled = dendro.rescaled();

    let heights = rescaled.heights();
    tracing::debug!(
        rows = dataset.len(),
        merges = rescaled.n_merges(),
        linkage = ?config.linkage,
        metric = ?config.metric,
        max_height = %format!("{:.4}", heights.iter().copied().fold(0.0, f64::max)),
        "dataset reordered"
    );

    Ok(dataset.permuted(&order)?.with_clustering(rescaled, order))
}

/// [`reorder`] with linkage and metric given by name, e.g. `"ward"`,
/// `"euclidean"`.
pub fn reorder_by_name(dataset: &Dataset, linkage: &str, metric: &str) -> Result<Dataset> {
    let config = ReorderConfig::new()
        .with_linkage(linkage.parse()?)
        .with_metric(metric.parse()?);
    reorder(dataset, &config)
}
