//! Agglomerative clustering and dendrogram-ordered reordering.
//!
//! Bottom-up: start with each row as its own cluster, repeatedly merge the
//! two closest clusters until one remains. The merge history forms a
//! **dendrogram**, and walking it gives the row order a heat map should use
//! so that similar rows sit next to each other.
//!
//! **Linkage methods** determine "distance between clusters":
//!
//! | Linkage | Distance | Effect |
//! |---------|----------|--------|
//! | Single | min(pairwise) | Chaining; elongated clusters |
//! | Complete | max(pairwise) | Compact, spherical clusters |
//! | Average | mean(pairwise) | Balanced compromise |
//! | Ward | Variance increase | Minimizes within-cluster variance |
//!
//! ## Usage
//!
//! ```rust
//! use nestcloud::cluster::{reorder, ReorderConfig};
//! use nestcloud::dataset::build_dataset;
//! use nestcloud::generate::Point;
//!
//! let points = vec![
//!     Point { x: 0.0, y: 0.0, group: 1, depth: 0 },
//!     Point { x: 10.0, y: 10.0, group: 2, depth: 0 },
//!     Point { x: 0.1, y: 0.1, group: 1, depth: 0 },
//! ];
//! let dataset = build_dataset(&points).unwrap();
//! let ordered = reorder(&dataset, &ReorderConfig::new()).unwrap();
//!
//! assert_eq!(ordered.linkage().unwrap().n_merges(), 2);
//! // The two group-1 points end up adjacent.
//! let groups: Vec<usize> = ordered.labels().iter().map(|l| l.group).collect();
//! assert_ne!(groups, vec![1, 2, 1]);
//! ```

mod hierarchical;
mod reorder;

pub use hierarchical::{condensed_distances, HierarchicalClustering, Linkage, Metric};
pub use reorder::{reorder, reorder_by_name, ReorderConfig};
