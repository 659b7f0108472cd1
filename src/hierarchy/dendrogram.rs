//! Linkage matrix as an arena-backed binary merge tree.
//!
//! Cluster ids follow the SciPy/MATLAB convention:
//! - leaves: `0..n`
//! - merge `i` creates cluster `n + i`
//!
//! so the merge list doubles as an arena: the node for cluster `c >= n` is
//! `merges[c - n]`, and both of its children have smaller ids. The root of a
//! complete tree over `n >= 2` leaves is `2n - 2`.

use crate::error::{Error, Result};

/// Offset added inside the display log so zero-height merges stay finite.
const HEIGHT_LOG_OFFSET: f64 = 0.1;

/// A dendrogram recording the full merge history of agglomerative clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    merges: Vec<Merge>,
    n_items: usize,
}

/// A single merge record.
///
/// `left < right` always holds; [`Dendrogram::add_merge`] normalizes the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Lower cluster id of the pair.
    pub left: usize,
    /// Higher cluster id of the pair.
    pub right: usize,
    /// Merge height (dissimilarity, or its display rescaling).
    pub height: f64,
    /// Number of leaves under the new cluster.
    pub size: usize,
}

/// Traversal rule for turning the merge tree into a row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafOrdering {
    /// Visit the lower cluster id first. This is what a plain dendrogram
    /// plot shows and keeps siblings in the order they were formed.
    #[default]
    MergeOrder,
    /// Visit the child with more leaves first; ties fall back to `MergeOrder`.
    LargerFirst,
}

impl Dendrogram {
    /// Create an empty dendrogram over `n_items` leaves.
    pub fn new(n_items: usize) -> Self {
        Self {
            merges: Vec::with_capacity(n_items.saturating_sub(1)),
            n_items,
        }
    }

    /// Record a merge. The new cluster gets id `n_items + n_merges()`.
    pub fn add_merge(&mut self, a: usize, b: usize, height: f64, size: usize) {
        self.merges.push(Merge {
            left: a.min(b),
            right: a.max(b),
            height,
            size,
        });
    }

    /// Number of original items.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// True once every item has been merged into a single root.
    pub fn is_complete(&self) -> bool {
        self.n_items > 0 && self.merges.len() == self.n_items - 1
    }

    /// Iterate over merges in the order they happened.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> {
        self.merges.iter()
    }

    /// Merge heights in merge order.
    pub fn heights(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.height).collect()
    }

    /// Root cluster id, if the tree is complete.
    pub fn root(&self) -> Option<usize> {
        self.is_complete().then(|| 2 * self.n_items - 2)
    }

    /// Children of cluster `id`, or `None` for a leaf or an unknown id.
    pub fn children(&self, id: usize) -> Option<(usize, usize)> {
        let m = self.merges.get(id.checked_sub(self.n_items)?)?;
        Some((m.left, m.right))
    }

    /// Number of leaves under cluster `id`.
    pub fn subtree_size(&self, id: usize) -> usize {
        match id.checked_sub(self.n_items) {
            None => 1,
            Some(i) => self.merges.get(i).map_or(0, |m| m.size),
        }
    }

    /// Leaf ids in dendrogram display order.
    ///
    /// Depth-first from the root, each merge's children visited in the
    /// order `ordering` picks. The result is a permutation of `0..n_items`.
    pub fn leaf_order(&self, ordering: LeafOrdering) -> Result<Vec<usize>> {
        let root = self.root().ok_or_else(|| {
            Error::InvalidInput(format!(
                "dendrogram over {} items has {} merges",
                self.n_items,
                self.merges.len()
            ))
        })?;

        let mut order = Vec::with_capacity(self.n_items);
        let mut seen = vec![false; self.n_items];
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let Some((left, right)) = self.children(id) else {
                if seen[id] {
                    return Err(Error::InvalidInput(format!("leaf {id} reached twice")));
                }
                seen[id] = true;
                order.push(id);
                continue;
            };
            if left >= id || right >= id {
                return Err(Error::InvalidInput(format!(
                    "cluster {id} merges a later cluster ({left}, {right})"
                )));
            }

            let (first, second) = match ordering {
                LeafOrdering::MergeOrder => (left, right),
                LeafOrdering::LargerFirst => {
                    if self.subtree_size(right) > self.subtree_size(left) {
                        (right, left)
                    } else {
                        (left, right)
                    }
                }
            };
            stack.push(second);
            stack.push(first);
        }

        if order.len() != self.n_items {
            return Err(Error::InvalidInput(format!(
                "traversal reached {} of {} leaves",
                order.len(),
                self.n_items
            )));
        }
        Ok(order)
    }

    /// Copy with heights log-compressed for display.
    ///
    /// Each height becomes `log2(h + 0.1)`, then the sequence is shifted so its
    /// minimum is exactly zero. Topology and merge order are untouched, and the
    /// transform is monotone, so relative height order is preserved too.
    pub fn rescaled(&self) -> Self {
        let logged: Vec<f64> = self
            .merges
            .iter()
            .map(|m| (m.height + HEIGHT_LOG_OFFSET).log2())
            .collect();
        let min = logged.iter().copied().fold(f64::INFINITY, f64::min);

        let merges = self
            .merges
            .iter()
            .zip(logged)
            .map(|(m, h)| Merge {
                height: h - min,
                ..*m
            })
            .collect();

        Self {
            merges,
            n_items: self.n_items,
        }
    }

    /// Flat cluster labels obtained by applying only the first `n - k` merges.
    ///
    /// Labels are numbered `0..k` in order of first appearance. `k == 0` or
    /// `k >= n_items` leaves every item in its own cluster.
    pub fn cut_to_k(&self, k: usize) -> Result<Vec<usize>> {
        let n = self.n_items;
        if k == 0 || k >= n {
            return Ok((0..n).collect());
        }
        let n_apply = n - k;
        if n_apply > self.merges.len() {
            return Err(Error::InvalidInput(format!(
                "{k} clusters need {n_apply} merges, dendrogram has {}",
                self.merges.len()
            )));
        }

        // Union-find over leaves; `rep` maps cluster id -> one of its leaves.
        let mut parent: Vec<usize> = (0..n).collect();
        let mut rep: Vec<usize> = (0..n).collect();
        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for (i, m) in self.merges.iter().take(n_apply).enumerate() {
            let (Some(&ra), Some(&rb)) = (rep.get(m.left), rep.get(m.right)) else {
                return Err(Error::InvalidInput(format!(
                    "merge {i} references unknown cluster ({}, {})",
                    m.left, m.right
                )));
            };
            let (ra, rb) = (find(&mut parent, ra), find(&mut parent, rb));
            parent[rb] = ra;
            debug_assert_eq!(rep.len(), n + i);
            rep.push(ra);
        }

        let mut labels = vec![usize::MAX; n];
        let mut by_root = vec![usize::MAX; n];
        let mut next = 0;
        for (item, label) in labels.iter_mut().enumerate() {
            let root = find(&mut parent, item);
            if by_root[root] == usize::MAX {
                by_root[root] = next;
                next += 1;
            }
            *label = by_root[root];
        }
        Ok(labels)
    }
}
