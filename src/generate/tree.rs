//! Recursive stochastic point-tree generator.
//!
//! Each call either emits a **leaf batch** (points kept in the output, sharing
//! one fresh group id) or takes a **branch step** (points used only as new
//! centers, each expanded by a recursive call with a tenth of the spread and
//! a decayed continue probability).
//!
//! ```text
//! depth 0:            c                 branch: 3 centers
//!                   / | \
//! depth 1:        c   L   c             L = leaf batch (group 1)
//!                 |       |
//! depth 2:        L       L             groups 2, 3
//! ```
//!
//! Every coordinate is `center + (u - 1) * spread` with `u ~ U[0, 1)`, so each
//! batch lies in the square `[center - spread, center]` on both axes.
//!
//! Termination relies on `continue_probability * decay^depth` shrinking, which
//! is only almost-sure. The `max_depth` guard turns a runaway configuration
//! into [`Error::Configuration`] instead of unbounded recursion.

use super::point::{Center, Point};
use super::sampler::sample_count;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Spread divisor applied at every branch step.
const SPREAD_SHRINK: f64 = 10.0;

/// Mutable state threaded through one generation run.
///
/// Owns the random stream and the group counter. Independent runs should use
/// independent contexts (or call [`GenerationContext::reset`] in between) so
/// group ids never leak across runs.
#[derive(Debug, Clone)]
pub struct GenerationContext<R = StdRng> {
    rng: R,
    group_counter: usize,
}

impl GenerationContext<StdRng> {
    /// Context with a seeded `StdRng`, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GenerationContext<R> {
    /// Context over an existing random source, counter at zero.
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng,
            group_counter: 0,
        }
    }

    /// Reset the group counter to zero. The random stream is left as is.
    pub fn reset(&mut self) {
        self.group_counter = 0;
    }

    /// Number of leaf batches emitted since the last reset.
    ///
    /// Equal to the largest group id handed out so far.
    pub fn group_count(&self) -> usize {
        self.group_counter
    }

    /// Mutable access to the random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    fn next_group(&mut self) -> usize {
        self.group_counter += 1;
        self.group_counter
    }
}

/// Parameters for [`generate_tree`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Width of the square each root-level batch is drawn from.
    pub spread: f64,
    /// Mean (and default standard deviation) of the per-step count.
    pub mean_branching: f64,
    /// Upper bound on the per-step count.
    pub max_branching: usize,
    /// Probability that the root call branches instead of emitting a leaf batch.
    pub continue_probability: f64,
    /// Factor applied to `continue_probability` at each branch level.
    pub branching_decay: f64,
    /// Deepest recursion level allowed before failing.
    pub max_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spread: 50.0,
            mean_branching: 5.0,
            max_branching: 10,
            continue_probability: 0.5,
            branching_decay: 0.5,
            max_depth: 32,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root spread.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Set the mean per-step count.
    pub fn with_mean_branching(mut self, mean: f64) -> Self {
        self.mean_branching = mean;
        self
    }

    /// Set the per-step count cap.
    pub fn with_max_branching(mut self, max: usize) -> Self {
        self.max_branching = max;
        self
    }

    /// Set the root continue probability.
    pub fn with_continue_probability(mut self, p: f64) -> Self {
        self.continue_probability = p;
        self
    }

    /// Set the per-level decay of the continue probability.
    pub fn with_branching_decay(mut self, decay: f64) -> Self {
        self.branching_decay = decay;
        self
    }

    /// Set the recursion-depth guard.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Check parameters that can be rejected up front.
    ///
    /// Whether a probability/decay pair terminates is only known by running it;
    /// that case is caught by the depth guard during generation.
    pub fn validate(&self) -> Result<()> {
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(Error::configuration(
                "spread",
                format!("must be finite and non-negative, got {}", self.spread),
            ));
        }
        if !self.mean_branching.is_finite() {
            return Err(Error::configuration(
                "mean_branching",
                format!("must be finite, got {}", self.mean_branching),
            ));
        }
        if self.max_branching == 0 {
            return Err(Error::configuration("max_branching", "must be at least 1"));
        }
        if self.continue_probability.is_nan() {
            return Err(Error::configuration("continue_probability", "must not be NaN"));
        }
        if !self.branching_decay.is_finite() || self.branching_decay < 0.0 {
            return Err(Error::configuration(
                "branching_decay",
                format!("must be finite and non-negative, got {}", self.branching_decay),
            ));
        }
        Ok(())
    }

    /// Generate a tree rooted at `center`, depth 0.
    pub fn generate<R: Rng>(&self, ctx: &mut GenerationContext<R>, center: Center) -> Result<Vec<Point>> {
        generate_tree(ctx, center, 0, self)
    }
}

/// Recursively generate a point tree around `center`.
///
/// `depth` is the recursion level of this call (normally 0); leaf batches are
/// tagged with the level they were emitted at. `config.spread` and
/// `config.continue_probability` apply to this call and shrink for deeper
/// ones.
///
/// The context's group counter is advanced once per leaf batch and is not
/// reset here.
pub fn generate_tree<R: Rng>(
    ctx: &mut GenerationContext<R>,
    center: Center,
    depth: usize,
    config: &GeneratorConfig,
) -> Result<Vec<Point>> {
    config.validate()?;

    let mut out = Vec::new();
    let step = Step {
        center,
        spread: config.spread,
        depth,
        continue_probability: config.continue_probability,
    };
    expand(ctx, step, config, &mut out)?;

    tracing::debug!(
        points = out.len(),
        groups = ctx.group_count(),
        root_depth = depth,
        "point tree generated"
    );
    Ok(out)
}

#[derive(Debug, Clone, Copy)]
struct Step {
    center: Center,
    spread: f64,
    depth: usize,
    continue_probability: f64,
}

fn expand<R: Rng>(
    ctx: &mut GenerationContext<R>,
    step: Step,
    config: &GeneratorConfig,
    out: &mut Vec<Point>,
) -> Result<()> {
    if step.depth > config.max_depth {
        tracing::warn!(
            depth = step.depth,
            max_depth = config.max_depth,
            continue_probability = step.continue_probability,
            "recursion depth guard tripped"
        );
        return Err(Error::configuration(
            "max_depth",
            format!(
                "recursion exceeded depth {} (continue_probability {}, decay {})",
                config.max_depth, config.continue_probability, config.branching_decay
            ),
        ));
    }

    let draw: f64 = ctx.rng.random();
    let count = sample_count(&mut ctx.rng, config.mean_branching, None)?.min(config.max_branching);

    if draw > step.continue_probability {
        let group = ctx.next_group();
        out.extend(scatter(ctx, step.center, step.spread, count).map(|[x, y]| Point {
            x,
            y,
            group,
            depth: step.depth,
        }));
        tracing::debug!(group, depth = step.depth, count, "leaf batch");
        return Ok(());
    }

    let centers: Vec<Center> = scatter(ctx, step.center, step.spread, count).collect();
    tracing::debug!(depth = step.depth, children = centers.len(), "branch step");

    for center in centers {
        let child = Step {
            center,
            spread: step.spread / SPREAD_SHRINK,
            depth: step.depth + 1,
            continue_probability: step.continue_probability * config.branching_decay,
        };
        expand(ctx, child, config, out)?;
    }
    Ok(())
}

/// `count` points in `[center - spread, center]` per axis.
fn scatter<'a, R: Rng>(
    ctx: &'a mut GenerationContext<R>,
    center: Center,
    spread: f64,
    count: usize,
) -> impl Iterator<Item = Center> + 'a {
    (0..count).map(move |_| {
        let x = center[0] + (ctx.rng.random::<f64>() - 1.0) * spread;
        let y = center[1] + (ctx.rng.random::<f64>() - 1.0) * spread;
        [x, y]
    })
}
