// * Seeded K-means (Lloyd iterations, k-means++ seeding, best-of-N restarts)
// * Deterministic for a given seed: every random draw comes from one StdRng

use crate::config::constants::{KMEANS_MAX_ITERATIONS, KMEANS_RESTARTS, KMEANS_SEED, KMEANS_TOLERANCE};
use crate::errors::ExtractError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// K-means configuration
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,
    /// Maximum Lloyd iterations per restart
    pub max_iterations: usize,
    /// Stop when no centroid moves farther than this (squared distance)
    pub tolerance: f64,
    /// Independent k-means++ initializations; the lowest inertia wins
    pub restarts: usize,
    pub seed: u64,
}

impl KMeansConfig {
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 5,
            max_iterations: KMEANS_MAX_ITERATIONS,
            tolerance: KMEANS_TOLERANCE,
            restarts: KMEANS_RESTARTS,
            seed: KMEANS_SEED,
        }
    }
}

/// Result of a K-means fit
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    pub centroids: Vec<Vec<f64>>,
    pub assignments: Vec<usize>,
    pub inertia: f64,
}

impl KMeansFit {
    /// Row indices assigned to `cluster`
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == cluster)
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Clusters `data` rows into `k` groups
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<KMeansFit, ExtractError> {
        let k = self.config.k;
        if k == 0 {
            return Err(ExtractError::Clustering("k must be at least 1".to_string()));
        }
        if data.len() < k {
            return Err(ExtractError::InsufficientDocuments {
                needed: k,
                actual: data.len(),
            });
        }

        let dimension = data[0].len();
        if data.iter().any(|row| row.len() != dimension) {
            return Err(ExtractError::Clustering("rows have mixed dimensions".to_string()));
        }
        if data.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ExtractError::Clustering("non-finite value in input".to_string()));
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut best: Option<KMeansFit> = None;

        for _ in 0..self.config.restarts.max(1) {
            let centroids = kmeans_plus_plus(data, k, &mut rng)?;
            let fit = self.lloyd(data, centroids);
            // * Strict improvement only, so the earliest restart wins ties
            let better = best.as_ref().map_or(true, |b| fit.inertia < b.inertia);
            if better {
                best = Some(fit);
            }
        }

        best.ok_or_else(|| ExtractError::Clustering("no restart completed".to_string()))
    }

    fn lloyd(&self, data: &[Vec<f64>], mut centroids: Vec<Vec<f64>>) -> KMeansFit {
        let mut assignments = assign(data, &centroids);

        for iteration in 0..self.config.max_iterations {
            let updated = update_centroids(data, &assignments, &centroids);
            let movement = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| squared_distance(old, new))
                .fold(0.0, f64::max);
            centroids = updated;

            let next = assign(data, &centroids);
            let changed = next != assignments;
            assignments = next;

            if !changed || movement <= self.config.tolerance {
                tracing::trace!(iteration, movement, "K-means converged");
                break;
            }
        }

        let inertia = data
            .iter()
            .zip(&assignments)
            .map(|(row, &c)| squared_distance(row, &centroids[c]))
            .sum();

        KMeansFit {
            centroids,
            assignments,
            inertia,
        }
    }
}

// * First centroid uniform, the rest weighted by squared distance to the nearest chosen centroid
fn kmeans_plus_plus(data: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Result<Vec<Vec<f64>>, ExtractError> {
    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    chosen.push(rng.gen_range(0..data.len()));

    while chosen.len() < k {
        let weights: Vec<f64> = data
            .iter()
            .map(|row| {
                chosen
                    .iter()
                    .map(|&c| squared_distance(row, &data[c]))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();

        let next = if weights.iter().sum::<f64>() > 0.0 {
            WeightedIndex::new(&weights)
                .map_err(|e| ExtractError::Clustering(format!("k-means++ weights: {}", e)))?
                .sample(rng)
        } else {
            // * Every point coincides with a centroid; take the first unused row
            (0..data.len()).find(|i| !chosen.contains(i)).unwrap_or(0)
        };
        chosen.push(next);
    }

    Ok(chosen.into_iter().map(|i| data[i].clone()).collect())
}

fn assign(data: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    data.iter().map(|row| nearest(row, centroids)).collect()
}

// * Ties go to the lowest centroid index
fn nearest(row: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(row, centroid);
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}

// * Empty clusters keep their previous centroid
fn update_centroids(data: &[Vec<f64>], assignments: &[usize], previous: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let dimension = previous.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dimension]; previous.len()];
    let mut sizes = vec![0usize; previous.len()];

    for (row, &cluster) in data.iter().zip(assignments) {
        sizes[cluster] += 1;
        for (s, v) in sums[cluster].iter_mut().zip(row) {
            *s += v;
        }
    }

    sums.into_iter()
        .zip(sizes)
        .zip(previous)
        .map(|((sum, size), old)| {
            if size == 0 {
                old.clone()
            } else {
                sum.into_iter().map(|s| s / size as f64).collect()
            }
        })
        .collect()
}

pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![10.0, 10.0],
            vec![10.1, 10.0],
            vec![10.0, 10.1],
        ]
    }

    #[test]
    fn test_separates_two_blobs() {
        let fit = KMeans::new(KMeansConfig::with_k(2)).fit(&blobs()).unwrap();

        assert_eq!(fit.assignments[0], fit.assignments[1]);
        assert_eq!(fit.assignments[0], fit.assignments[2]);
        assert_eq!(fit.assignments[3], fit.assignments[4]);
        assert_ne!(fit.assignments[0], fit.assignments[3]);
        assert!(fit.inertia < 0.1);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let kmeans = KMeans::new(KMeansConfig::with_k(3));
        assert_eq!(kmeans.fit(&blobs()).unwrap(), kmeans.fit(&blobs()).unwrap());
    }

    #[test]
    fn test_identical_points() {
        let data = vec![vec![1.0, 1.0]; 4];
        let fit = KMeans::new(KMeansConfig::with_k(2)).fit(&data).unwrap();

        assert_eq!(fit.assignments.len(), 4);
        assert_eq!(fit.inertia, 0.0);
    }

    #[test]
    fn test_too_few_points() {
        let result = KMeans::new(KMeansConfig::with_k(3)).fit(&blobs()[..2]);
        assert!(matches!(result, Err(ExtractError::InsufficientDocuments { .. })));
    }

    #[test]
    fn test_non_finite_rejected() {
        let data = vec![vec![f64::NAN], vec![1.0]];
        let result = KMeans::new(KMeansConfig::with_k(1)).fit(&data);
        assert!(matches!(result, Err(ExtractError::Clustering(_))));
    }

    #[test]
    fn test_members() {
        let fit = KMeansFit {
            centroids: vec![],
            assignments: vec![1, 0, 1],
            inertia: 0.0,
        };
        assert_eq!(fit.members(1), vec![0, 2]);
    }
}
