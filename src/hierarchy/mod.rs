//! Merge trees produced by agglomerative clustering.
//!
//! A [`Dendrogram`] records the complete merge history:
//!
//! ```text
//!         6 (height=1.0)
//!        / \
//!       4   5 (height=0.7)
//!      / \ / \
//!     0  1 2  3 (leaves)
//! ```
//!
//! Walking it depth-first yields the **leaf order**, the row permutation that
//! lines a data matrix up with its dendrogram. [`LeafOrdering`] pins down how
//! siblings are visited so the order never depends on a plotting library's
//! defaults.

mod dendrogram;

pub use dendrogram::{Dendrogram, LeafOrdering, Merge};
