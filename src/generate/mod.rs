//! Synthetic nested point clouds.
//!
//! Points are produced by a recursive process that either scatters a batch
//! of points around a center or scatters new centers and recurses into each
//! one at a tenth of the spread. The result is a cloud of clusters inside
//! clusters, with every point carrying the batch id and depth it came from,
//! which makes it a convenient ground truth for hierarchical clustering.
//!
//! ```rust
//! use nestcloud::generate::{GenerationContext, GeneratorConfig};
//!
//! let config = GeneratorConfig::new()
//!     .with_spread(1000.0)
//!     .with_mean_branching(3.0)
//!     .with_max_branching(5)
//!     .with_continue_probability(1.0)
//!     .with_branching_decay(0.8);
//!
//! let mut ctx = GenerationContext::seeded(7);
//! let points = config.generate(&mut ctx, [100.0, 100.0]).unwrap();
//! assert!(points.iter().all(|p| p.depth >= 1));
//! ```

mod point;
mod sampler;
mod tree;

pub use point::{Center, Label, Point};
pub use sampler::sample_count;
pub use tree::{generate_tree, GenerationContext, GeneratorConfig};
