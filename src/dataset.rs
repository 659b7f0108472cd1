//! Clusterable datasets: a coordinate matrix with a parallel label column.
//!
//! Row `i` of [`Dataset::coordinates`] and entry `i` of [`Dataset::labels`]
//! always describe the same observation. Every operation that reorders rows
//! goes through [`Dataset::permuted`], which moves both together.

use crate::error::{Error, Result};
use crate::generate::{Label, Point};
use crate::hierarchy::Dendrogram;
use ndarray::{Array2, ArrayView1, Axis};

/// Coordinates, provenance labels, and (after clustering) the merge tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    coordinates: Array2<f64>,
    labels: Vec<Label>,
    dimensions: Vec<String>,
    linkage: Option<Dendrogram>,
    leaf_order: Option<Vec<usize>>,
}

/// Split generated points into a dataset, preserving input order.
///
/// Fails with [`Error::InvalidInput`] on an empty slice.
pub fn build_dataset(points: &[Point]) -> Result<Dataset> {
    if points.is_empty() {
        return Err(Error::InvalidInput("no points to build a dataset from".into()));
    }

    let flat: Vec<f64> = points.iter().flat_map(Point::coordinates).collect();
    let coordinates = Array2::from_shape_vec((points.len(), 2), flat)
        .map_err(|e| Error::InvalidInput(e.to_string()))?;
    let labels = points.iter().map(Point::label).collect();

    Dataset::from_parts(coordinates, labels)
}

impl Dataset {
    /// Assemble a dataset from a coordinate matrix and one label per row.
    ///
    /// Dimension names default to `x`, `y` for two columns and `dim 1`,
    /// `dim 2`, ... otherwise.
    pub fn from_parts(coordinates: Array2<f64>, labels: Vec<Label>) -> Result<Self> {
        if coordinates.nrows() == 0 {
            return Err(Error::InvalidInput("dataset has no rows".into()));
        }
        if coordinates.ncols() == 0 {
            return Err(Error::InvalidInput("dataset has no columns".into()));
        }
        if labels.len() != coordinates.nrows() {
            return Err(Error::DimensionMismatch {
                expected: coordinates.nrows(),
                found: labels.len(),
            });
        }

        let dimensions = match coordinates.ncols() {
            2 => vec!["x".to_string(), "y".to_string()],
            d => (1..=d).map(|i| format!("dim {i}")).collect(),
        };

        Ok(Self {
            coordinates,
            labels,
            dimensions,
            linkage: None,
            leaf_order: None,
        })
    }

    /// Replace the dimension (column) names.
    pub fn with_dimensions(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.coordinates.ncols() {
            return Err(Error::DimensionMismatch {
                expected: self.coordinates.ncols(),
                found: names.len(),
            });
        }
        self.dimensions = names;
        Ok(self)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed dataset; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `n x d` coordinate matrix, one observation per row.
    pub fn coordinates(&self) -> &Array2<f64> {
        &self.coordinates
    }

    /// Provenance label per row.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Column names.
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// Merge tree with display-rescaled heights, set by clustering.
    pub fn linkage(&self) -> Option<&Dendrogram> {
        self.linkage.as_ref()
    }

    /// Original row index of each displayed row, set by clustering.
    pub fn leaf_order(&self) -> Option<&[usize]> {
        self.leaf_order.as_deref()
    }

    /// Rows paired with their labels.
    pub fn rows(&self) -> impl Iterator<Item = (ArrayView1<'_, f64>, &Label)> {
        self.coordinates.outer_iter().zip(self.labels.iter())
    }

    /// A copy with row `i` taken from row `order[i]` of `self`.
    ///
    /// `order` must be a permutation of `0..len()`. Coordinates and labels
    /// move together. Any attached linkage and leaf order describe the old
    /// row layout and are not carried over.
    pub fn permuted(&self, order: &[usize]) -> Result<Self> {
        check_permutation(order, self.len())?;

        Ok(Self {
            coordinates: self.coordinates.select(Axis(0), order),
            labels: order.iter().map(|&i| self.labels[i]).collect(),
            dimensions: self.dimensions.clone(),
            linkage: None,
            leaf_order: None,
        })
    }

    pub(crate) fn with_clustering(mut self, linkage: Dendrogram, leaf_order: Vec<usize>) -> Self {
        self.linkage = Some(linkage);
        self.leaf_order = Some(leaf_order);
        self
    }
}

fn check_permutation(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: order.len(),
        });
    }
    let mut seen = vec![false; n];
    for &i in order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => return Err(Error::InvalidInput(format!("row {i} appears twice in order"))),
            None => return Err(Error::InvalidInput(format!("row {i} out of range for {n} rows"))),
        }
    }
    Ok(())
}
