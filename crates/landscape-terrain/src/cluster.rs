//! Region classification: k-means clustering of vertex XY positions.
//!
//! Lloyd's algorithm with k-means++ seeding. Iteration stops when assignments
//! stop changing, when the total squared centroid shift drops below
//! `tolerance` times the mean per-axis variance of the input, or when
//! `max_iterations` is reached.

use glam::DVec2;
use hashbrown::HashSet;
use rand::Rng;

use crate::biome::RegionLabel;
use crate::error::{ConfigurationError, TerrainError};

/// K-means parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeans {
    /// Number of clusters.
    pub k: usize,
    /// Hard cap on Lloyd iterations.
    pub max_iterations: usize,
    /// Relative convergence threshold on centroid movement.
    pub tolerance: f64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            k: 3,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

/// Result of a k-means run.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    /// One label per input point, in input order.
    pub labels: Vec<RegionLabel>,
    /// Final cluster centres, indexed by label.
    pub centroids: Vec<DVec2>,
    /// Lloyd iterations performed.
    pub iterations: usize,
    /// Sum of squared distances from each point to its centroid.
    pub inertia: f64,
    /// `false` if the iteration cap was hit first.
    pub converged: bool,
}

impl Clustering {
    /// Number of points per label.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for label in &self.labels {
            sizes[label.index()] += 1;
        }
        sizes
    }
}

impl KMeans {
    /// Creates parameters for `k` clusters with default iteration settings.
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Partitions `points` into `k` clusters.
    ///
    /// Label numbering is arbitrary: the same points can come back with
    /// permuted labels under a different random stream.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::ZeroClusters`] if `k == 0`.
    /// - [`ConfigurationError::ZeroCount`] if `max_iterations == 0`.
    /// - [`ConfigurationError::TooFewDistinctPoints`] if fewer than `k` distinct points exist.
    /// - [`TerrainError::DegenerateCluster`] if a cluster is empty at the end.
    pub fn fit<R: Rng>(&self, points: &[DVec2], rng: &mut R) -> Result<Clustering, TerrainError> {
        let k = self.k;
        if k == 0 {
            return Err(ConfigurationError::ZeroClusters.into());
        }
        if k > u16::MAX as usize {
            return Err(ConfigurationError::TooManyClusters(k).into());
        }
        if self.max_iterations == 0 {
            return Err(ConfigurationError::ZeroCount("max_iterations").into());
        }
        let distinct = count_distinct(points, k);
        if distinct < k {
            return Err(ConfigurationError::TooFewDistinctPoints { k, distinct }.into());
        }

        let threshold = self.tolerance * mean_axis_variance(points);
        let mut centroids = seed_plus_plus(points, k, rng);
        let mut assignment = assign(points, &centroids);
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            let updated = update_centroids(points, &assignment, &centroids);
            let shift: f64 = updated
                .iter()
                .zip(&centroids)
                .map(|(a, b)| a.distance_squared(*b))
                .sum();
            centroids = updated;

            let next = assign(points, &centroids);
            let changed = next != assignment;
            assignment = next;

            tracing::trace!(iteration = iterations, shift, changed, "k-means step");

            if !changed || shift <= threshold {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::warn!(
                max_iterations = self.max_iterations,
                "k-means hit the iteration cap before converging"
            );
        }

        let mut sizes = vec![0usize; k];
        for &c in &assignment {
            sizes[c] += 1;
        }
        if let Some(empty) = sizes.iter().position(|&s| s == 0) {
            return Err(TerrainError::DegenerateCluster {
                label: RegionLabel(empty as u16),
                iterations,
            });
        }

        let inertia = points
            .iter()
            .zip(&assignment)
            .map(|(p, &c)| p.distance_squared(centroids[c]))
            .sum();

        tracing::debug!(k, iterations, inertia, converged, ?sizes, "k-means finished");

        Ok(Clustering {
            labels: assignment
                .into_iter()
                .map(|c| RegionLabel(c as u16))
                .collect(),
            centroids,
            iterations,
            inertia,
            converged,
        })
    }
}

/// Counts distinct points, stopping early once `enough` have been seen.
fn count_distinct(points: &[DVec2], enough: usize) -> usize {
    let mut seen = HashSet::new();
    for p in points {
        // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
        seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits()));
        if seen.len() >= enough {
            break;
        }
    }
    seen.len()
}

fn mean_axis_variance(points: &[DVec2]) -> f64 {
    let n = points.len() as f64;
    let mean = points.iter().copied().sum::<DVec2>() / n;
    let var = points
        .iter()
        .map(|p| (*p - mean) * (*p - mean))
        .sum::<DVec2>()
        / n;
    (var.x + var.y) * 0.5
}

/// k-means++: first centre uniform, each further centre drawn with
/// probability proportional to its squared distance from the nearest centre.
fn seed_plus_plus<R: Rng>(points: &[DVec2], k: usize, rng: &mut R) -> Vec<DVec2> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..points.len())]);

    let mut nearest: Vec<f64> = points
        .iter()
        .map(|p| p.distance_squared(centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = nearest.iter().sum();
        let mut target = rng.random::<f64>() * total;
        let mut chosen = None;
        for (i, &d) in nearest.iter().enumerate() {
            if d <= 0.0 {
                continue;
            }
            chosen = Some(i);
            if target < d {
                break;
            }
            target -= d;
        }
        // At least one positive weight exists while distinct points remain.
        let Some(index) = chosen else { break };

        let centre = points[index];
        centroids.push(centre);
        for (d, p) in nearest.iter_mut().zip(points) {
            *d = d.min(p.distance_squared(centre));
        }
    }

    centroids
}

/// Nearest-centroid index per point; ties go to the lower index.
fn assign(points: &[DVec2], centroids: &[DVec2]) -> Vec<usize> {
    points
        .iter()
        .map(|p| {
            let mut best = 0;
            let mut best_d = f64::INFINITY;
            for (i, c) in centroids.iter().enumerate() {
                let d = p.distance_squared(*c);
                if d < best_d {
                    best = i;
                    best_d = d;
                }
            }
            best
        })
        .collect()
}

/// Mean of each cluster's members. Empty clusters are moved onto the point
/// farthest from its own centroid so every label stays in play.
fn update_centroids(points: &[DVec2], assignment: &[usize], previous: &[DVec2]) -> Vec<DVec2> {
    let k = previous.len();
    let mut sums = vec![DVec2::ZERO; k];
    let mut counts = vec![0usize; k];
    for (p, &c) in points.iter().zip(assignment) {
        sums[c] += *p;
        counts[c] += 1;
    }

    let mut centroids: Vec<DVec2> = sums
        .iter()
        .zip(&counts)
        .zip(previous)
        .map(|((s, &n), prev)| if n > 0 { *s / n as f64 } else { *prev })
        .collect();

    let empty: Vec<usize> = (0..k).filter(|&c| counts[c] == 0).collect();
    if !empty.is_empty() {
        let mut by_distance: Vec<usize> = (0..points.len()).collect();
        by_distance.sort_by(|&a, &b| {
            let da = points[a].distance_squared(centroids[assignment[a]]);
            let db = points[b].distance_squared(centroids[assignment[b]]);
            db.total_cmp(&da)
        });
        for (cluster, &donor) in empty.iter().zip(&by_distance) {
            tracing::warn!(cluster, "empty cluster relocated to farthest point");
            centroids[*cluster] = points[donor];
        }
    }

    centroids
}
