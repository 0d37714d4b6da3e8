//! Plain k-means over 2D points.
//!
//! Centers are initialized from a sample of `k` distinct input points,
//! optionally with a fixed seed for reproducible runs. Iteration stops when
//! no center moves by more than `tol`, or after `max_iters` rounds. A
//! cluster that loses all members keeps its previous center instead of
//! collapsing to NaN.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Knobs for [`kmeans`].
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct KMeansOptions {
    /// Number of clusters (k).
    pub clusters: usize,
    /// Iteration cap.
    pub max_iters: usize,
    /// Convergence tolerance on the maximum center movement, in pixels.
    pub tol: f32,
    /// Fixed RNG seed for the center initialization.
    pub seed: Option<u64>,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            clusters: 6,
            max_iters: 100,
            tol: 1e-4,
            seed: None,
        }
    }
}

/// Result of a k-means run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Clustering {
    pub centers: Vec<[f32; 2]>,
    /// Cluster index per input point, parallel to the input slice.
    pub labels: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}

/// Cluster `points` into `options.clusters` groups.
///
/// Errors when `clusters` is zero or exceeds the number of points.
pub fn kmeans(points: &[[f32; 2]], options: &KMeansOptions) -> Result<Clustering, String> {
    let k = options.clusters;
    if k == 0 {
        return Err("k-means requires at least one cluster".to_string());
    }
    if points.len() < k {
        return Err(format!(
            "k-means requires at least {k} points, got {}",
            points.len()
        ));
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut centers: Vec<[f32; 2]> = sample(&mut rng, points.len(), k)
        .into_iter()
        .map(|i| points[i])
        .collect();

    let mut labels = vec![0usize; points.len()];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..options.max_iters {
        iterations += 1;

        for (label, p) in labels.iter_mut().zip(points.iter()) {
            *label = nearest_center(*p, &centers);
        }

        let mut sums = vec![[0.0f32; 2]; k];
        let mut counts = vec![0usize; k];
        for (&label, p) in labels.iter().zip(points.iter()) {
            sums[label][0] += p[0];
            sums[label][1] += p[1];
            counts[label] += 1;
        }

        let mut movement = 0.0f32;
        for i in 0..k {
            if counts[i] == 0 {
                // Empty cluster keeps its previous center.
                continue;
            }
            let n = counts[i] as f32;
            let next = [sums[i][0] / n, sums[i][1] / n];
            let dx = next[0] - centers[i][0];
            let dy = next[1] - centers[i][1];
            movement = movement.max((dx * dx + dy * dy).sqrt());
            centers[i] = next;
        }

        if movement <= options.tol {
            converged = true;
            break;
        }
    }

    debug!(
        "kmeans: k={k}, {} points, {} iterations, converged={converged}",
        points.len(),
        iterations
    );

    Ok(Clustering {
        centers,
        labels,
        iterations,
        converged,
    })
}

fn nearest_center(p: [f32; 2], centers: &[[f32; 2]]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, c) in centers.iter().enumerate() {
        let dx = p[0] - c[0];
        let dy = p[1] - c[1];
        let d = dx * dx + dy * dy;
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}
