//! Hierarchical (agglomerative) clustering.
//!
//! Bottom-up clustering that builds a **dendrogram** by iteratively
//! merging the closest clusters until one remains.
//!
//! # Linkage Methods
//!
//! The key choice: how do we define "distance between clusters"?
//!
//! | Linkage | Formula | Effect |
//! |---------|---------|--------|
//! | Single | min(d(a,b)) for a∈A, b∈B | Chaining; elongated clusters |
//! | Complete | max(d(a,b)) | Compact, spherical clusters |
//! | Average | mean(d(a,b)) | Balanced compromise |
//! | Weighted | mean of the two merged clusters' distances | WPGMA |
//! | Ward | Δ variance | Minimizes within-cluster variance |
//! | Centroid | ‖μₐ - μᵦ‖ | UPGMC; heights may invert |
//! | Median | ‖mₐ - mᵦ‖, m = midpoint of children | WPGMC; heights may invert |
//!
//! ## Ward's Method: Variance Minimization
//!
//! Ward linkage minimizes the increase in total within-cluster variance
//! when merging clusters A and B:
//!
//! ```text
//! Δ(A,B) = (nₐ × nᵦ)/(nₐ + nᵦ) × ||μₐ - μᵦ||²
//! ```
//!
//! Ward, centroid and median linkage are only meaningful over Euclidean
//! distances; pairing them with another metric is rejected.
//!
//! # Cost
//!
//! O(n²) memory for the condensed distance matrix, O(n²) to O(n³) time
//! depending on the method.

use crate::error::{Error, Result};
use crate::hierarchy::Dendrogram;
use core::str::FromStr;
use kodama::{linkage as kodama_linkage, Method as KodamaMethod};
use ndarray::{ArrayView1, ArrayView2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Linkage method for hierarchical clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Linkage {
    /// Single linkage: minimum distance between clusters.
    Single,
    /// Complete linkage: maximum distance between clusters.
    Complete,
    /// Average linkage (UPGMA): mean distance between clusters.
    Average,
    /// Weighted linkage (WPGMA).
    Weighted,
    /// Ward's method: minimize within-cluster variance.
    #[default]
    Ward,
    /// Centroid linkage (UPGMC).
    Centroid,
    /// Median linkage (WPGMC).
    Median,
}

impl Linkage {
    /// True for methods defined only over Euclidean distances.
    pub fn requires_euclidean(self) -> bool {
        matches!(self, Linkage::Ward | Linkage::Centroid | Linkage::Median)
    }

    fn to_kodama(self) -> KodamaMethod {
        match self {
            Linkage::Single => KodamaMethod::Single,
            Linkage::Complete => KodamaMethod::Complete,
            Linkage::Average => KodamaMethod::Average,
            Linkage::Weighted => KodamaMethod::Weighted,
            Linkage::Ward => KodamaMethod::Ward,
            Linkage::Centroid => KodamaMethod::Centroid,
            Linkage::Median => KodamaMethod::Median,
        }
    }
}

impl FromStr for Linkage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            "average" => Ok(Linkage::Average),
            "weighted" => Ok(Linkage::Weighted),
            "ward" => Ok(Linkage::Ward),
            "centroid" => Ok(Linkage::Centroid),
            "median" => Ok(Linkage::Median),
            other => Err(Error::configuration(
                "linkage",
                format!("unknown linkage method '{other}'"),
            )),
        }
    }
}

/// Distance between two rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// L2 distance.
    #[default]
    Euclidean,
    /// Squared L2 distance.
    SqEuclidean,
    /// L1 (Manhattan) distance.
    Cityblock,
    /// L∞ distance.
    Chebyshev,
}

impl Metric {
    /// Distance between `a` and `b`.
    #[inline]
    pub fn distance(self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        let diffs = a.iter().zip(b.iter()).map(|(x, y)| x - y);
        match self {
            Metric::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            Metric::SqEuclidean => diffs.map(|d| d * d).sum(),
            Metric::Cityblock => diffs.map(f64::abs).sum(),
            Metric::Chebyshev => diffs.map(f64::abs).fold(0.0, f64::max),
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "sqeuclidean" => Ok(Metric::SqEuclidean),
            "cityblock" | "manhattan" => Ok(Metric::Cityblock),
            "chebyshev" => Ok(Metric::Chebyshev),
            other => Err(Error::configuration(
                "metric",
                format!("unknown distance metric '{other}'"),
            )),
        }
    }
}

/// Condensed pairwise distance matrix (upper triangle, row-major).
///
/// Entry for rows `i < j` sits at `n*i - i*(i+1)/2 + (j - i - 1)`; length is
/// `n choose 2`.
pub fn condensed_distances(data: ArrayView2<'_, f64>, metric: Metric) -> Vec<f64> {
    let n = data.nrows();
    if n < 2 {
        return Vec::new();
    }

    #[cfg(feature = "parallel")]
    let condensed: Vec<f64> = (0..n - 1)
        .into_par_iter()
        .flat_map_iter(|row| {
            ((row + 1)..n).map(move |col| metric.distance(data.row(row), data.row(col)))
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let condensed = {
        let mut condensed = Vec::with_capacity((n * (n - 1)) / 2);
        for row in 0..(n - 1) {
            for col in (row + 1)..n {
                condensed.push(metric.distance(data.row(row), data.row(col)));
            }
        }
        condensed
    };

    condensed
}

/// Hierarchical (agglomerative) clustering.
#[derive(Debug, Clone, Default)]
pub struct HierarchicalClustering {
    linkage: Linkage,
    metric: Metric,
}

impl HierarchicalClustering {
    /// Ward linkage over Euclidean distances.
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

    /// Linkage method in use.
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Distance metric in use.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Cluster the rows of `data` and return the full dendrogram.
    ///
    /// Coincident rows are fine: they merge at height zero. Fails with
    /// [`Error::DegenerateInput`] for fewer than two rows or any non-finite
    /// coordinate or distance.
    pub fn fit_dendrogram(&self, data: ArrayView2<'_, f64>) -> Result<Dendrogram> {
        let n = data.nrows();
        if n < 2 {
            return Err(Error::DegenerateInput {
                n_rows: n,
                reason: "need at least two rows to merge",
            });
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(Error::DegenerateInput {
                n_rows: n,
                reason: "coordinates contain NaN or infinity",
            });
        }
        if self.linkage.requires_euclidean() && self.metric != Metric::Euclidean {
            return Err(Error::configuration(
                "metric",
                format!("{:?} linkage requires euclidean distances, got {:?}", self.linkage, self.metric),
            ));
        }

        let mut condensed = condensed_distances(data, self.metric);
        if condensed.iter().any(|d| !d.is_finite()) {
            return Err(Error::DegenerateInput {
                n_rows: n,
                reason: "pairwise distance overflowed",
            });
        }

        // kodama labels leaves 0..n-1 and gives merge i the id n+i, which is
        // exactly the arena layout of `Dendrogram`.
        let dend = kodama_linkage(&mut condensed, n, self.linkage.to_kodama());

        let mut dendro = Dendrogram::new(n);
        for step in dend.steps() {
            dendro.add_merge(step.cluster1, step.cluster2, step.dissimilarity, step.size);
        }

        if !dendro.is_complete() {
            return Err(Error::DegenerateInput {
                n_rows: n,
                reason: "linkage did not reduce to a single root",
            });
        }
        Ok(dendro)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::hierarchy::LeafOrdering;
    use ndarray::{array, Array2};

    #[test]
    fn test_hierarchical_basic() {
        let data = array![[0.0, 0.0], [0.1, 0.1], [10.0, 10.0], [10.1, 10.1]];

        let dendro = HierarchicalClustering::new().fit_dendrogram(data.view()).unwrap();
        let labels = dendro.cut_to_k(2).unwrap();

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_dendrogram() {
        let data = array![[0.0, 0.0], [1.0, 0.0], [10.0, 0.0]];

        for linkage in [
            Linkage::Single,
            Linkage::Complete,
            Linkage::Average,
            Linkage::Weighted,
            Linkage::Ward,
            Linkage::Centroid,
            Linkage::Median,
        ] {
            let dendro = HierarchicalClustering::new()
                .with_linkage(linkage)
                .fit_dendrogram(data.view())
                .unwrap();
            assert_eq!(dendro.n_items(), 3);
            assert_eq!(dendro.n_merges(), 2);
            // First merge is always the close pair.
            let first = dendro.merges().next().unwrap();
            assert_eq!((first.left, first.right), (0, 1));
            assert!((first.height - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_linkage_heights() {
        let data = array![[0.0], [1.0], [3.0], [7.0]];
        let dendro = HierarchicalClustering::new()
            .with_linkage(Linkage::Single)
            .fit_dendrogram(data.view())
            .unwrap();
        assert_eq!(dendro.heights(), vec![1.0, 2.0, 4.0]);
        assert_eq!(dendro.leaf_order(LeafOrdering::MergeOrder).unwrap(), vec![3, 2, 0, 1]);
    }

    #[test]
    fn test_coincident_rows_merge_at_zero() {
        let data = array![[1.0, 1.0], [1.0, 1.0], [5.0, 5.0]];
        let dendro = HierarchicalClustering::new().fit_dendrogram(data.view()).unwrap();
        assert_eq!(dendro.heights()[0], 0.0);
        assert!(dendro.is_complete());
    }

    #[test]
    fn test_too_few_rows() {
        let data = Array2::<f64>::zeros((1, 2));
        let err = HierarchicalClustering::new().fit_dendrogram(data.view()).unwrap_err();
        assert!(matches!(err, Error::DegenerateInput { n_rows: 1, .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        let data = array![[0.0, f64::NAN], [1.0, 1.0]];
        assert!(matches!(
            HierarchicalClustering::new().fit_dendrogram(data.view()),
            Err(Error::DegenerateInput { .. })
        ));

        let data = array![[-1.0e308, 0.0], [1.0e308, 0.0]];
        assert!(matches!(
            HierarchicalClustering::new().fit_dendrogram(data.view()),
            Err(Error::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_ward_requires_euclidean() {
        let data = array![[0.0, 0.0], [1.0, 0.0]];
        let hc = HierarchicalClustering::new().with_metric(Metric::Cityblock);
        assert!(matches!(
            hc.fit_dendrogram(data.view()),
            Err(Error::Configuration { name: "metric", .. })
        ));
        assert!(hc.with_linkage(Linkage::Average).fit_dendrogram(data.view()).is_ok());
    }

    #[test]
    fn test_metrics() {
        let a = array![0.0, 0.0];
        let b = array![3.0, -4.0];
        assert_eq!(Metric::Euclidean.distance(a.view(), b.view()), 5.0);
        assert_eq!(Metric::SqEuclidean.distance(a.view(), b.view()), 25.0);
        assert_eq!(Metric::Cityblock.distance(a.view(), b.view()), 7.0);
        assert_eq!(Metric::Chebyshev.distance(a.view(), b.view()), 4.0);
    }

    #[test]
    fn test_condensed_layout() {
        let data = array![[0.0], [1.0], [3.0], [6.0]];
        let d = condensed_distances(data.view(), Metric::Euclidean);
        assert_eq!(d, vec![1.0, 3.0, 6.0, 2.0, 5.0, 3.0]);
        assert!(condensed_distances(data.slice(ndarray::s![..1, ..]), Metric::Euclidean).is_empty());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("ward".parse::<Linkage>().unwrap(), Linkage::Ward);
        assert_eq!("Average".parse::<Linkage>().unwrap(), Linkage::Average);
        assert_eq!("euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!("manhattan".parse::<Metric>().unwrap(), Metric::Cityblock);
        assert!(matches!("nearest".parse::<Linkage>(), Err(Error::Configuration { name: "linkage", .. })));
        assert!(matches!("cosine".parse::<Metric>(), Err(Error::Configuration { name: "metric", .. })));
    }
}
