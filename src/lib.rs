//! # nestcloud
//!
//! Synthetic nested point clouds and dendrogram-ordered hierarchical clustering.
//!
//! The pipeline has three stages:
//!
//! ```text
//! generate::generate_tree  ->  dataset::build_dataset  ->  cluster::reorder
//!   points tagged with          coordinates + labels         rows in leaf order,
//!   group:depth provenance      as parallel columns          rescaled linkage
//! ```
//!
//! Everything is in-memory and synchronous. Random state lives in an explicit
//! [`GenerationContext`], so runs are reproducible and isolated from each other.
//!
//! ```rust
//! use nestcloud::{build_dataset, reorder, GenerationContext, GeneratorConfig, ReorderConfig};
//!
//! let mut ctx = GenerationContext::seeded(1);
//! let points = GeneratorConfig::new()
//!     .with_continue_probability(1.0)
//!     .generate(&mut ctx, [50.0, 50.0])?;
//! let dataset = build_dataset(&points)?;
//! if dataset.len() >= 2 {
//!     let ordered = reorder(&dataset, &ReorderConfig::new())?;
//!     assert_eq!(ordered.len(), dataset.len());
//! }
//! # Ok::<(), nestcloud::Error>(())
//! ```

pub mod cluster;
pub mod dataset;
/// Error types used across `nestcloud`.
pub mod error;
pub mod generate;
pub mod hierarchy;

pub use cluster::{reorder, reorder_by_name, HierarchicalClustering, Linkage, Metric, ReorderConfig};
pub use dataset::{build_dataset, Dataset};
pub use error::{Error, Result};
pub use generate::{generate_tree, sample_count, GenerationContext, GeneratorConfig, Label, Point};
pub use hierarchy::{Dendrogram, LeafOrdering, Merge};
