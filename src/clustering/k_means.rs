//! K-Means with fixed seeds.
//!
//! Each step rebuilds every cluster from scratch: items are assigned to the
//! nearest center of the previous iteration, then each center moves to the
//! mean of its new members. The run ends at the first step that reproduces
//! the previous iteration.

use std::fmt;

use log::warn;

use super::cluster::{Cluster, ClusterId, ClusterKind};
use super::engine::Algorithm;
use super::item::Item;
use super::iteration::Iteration;
use super::point::{centroid, distance_sq, Point};
use crate::error::{Error, Result};

/// K-Means clustering seeded with explicit starting centers.
///
/// Cluster `i` starts at `seeds[i]` and keeps the id `ClusterId(i)` for the
/// whole run.
///
/// # Example
///
/// ```
/// use stepwise_clustering::{Clustering, Item, KMeans, Point};
///
/// let items = Item::from_points(&[(1.0, 2.0), (1.5, 1.8), (5.0, 8.0), (8.0, 8.0)]);
/// let kmeans = KMeans::new(vec![Point::new(1.0, 1.0), Point::new(6.0, 6.0)]);
///
/// let mut run = Clustering::new(items, kmeans).unwrap();
/// run.compute().unwrap();
///
/// let last = run.final_iteration().unwrap();
/// assert_eq!(last.clusters()[0].len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    seeds: Vec<Point>,
}

impl KMeans {
    pub fn new(seeds: Vec<Point>) -> Self {
        Self { seeds }
    }

    pub fn seeds(&self) -> &[Point] {
        &self.seeds
    }

    /// Index of the cluster whose center is nearest to `item`. The first
    /// cluster wins ties.
    fn closest_cluster(item: &Item, clusters: &[Cluster]) -> Option<usize> {
        let position = item.position();
        let mut best: Option<(usize, f64)> = None;
        for (idx, cluster) in clusters.iter().enumerate() {
            let Some(center) = cluster.center() else {
                continue;
            };
            let dist = distance_sq(position, center);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((idx, dist)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Same center, compared exactly, and same members. A center only
    /// depends on its members, so once the members settle the centers are
    /// reproduced bit for bit.
    fn same_cluster(previous: &Cluster, next: &Cluster) -> bool {
        previous.center() == next.center() && previous.same_members(next)
    }

    fn converged(previous: &Iteration, next: &Iteration) -> bool {
        previous.clusters().iter().all(|old| {
            next.cluster(old.id())
                .is_some_and(|new| Self::same_cluster(old, new))
        })
    }
}

impl Algorithm for KMeans {
    const NAME: &'static str = "K-Means";

    fn validate(&self, _items: &[Item]) -> Result<()> {
        if self.seeds.is_empty() {
            return Err(Error::NoSeeds);
        }
        if self
            .seeds
            .iter()
            .any(|seed| !seed.x.is_finite() || !seed.y.is_finite())
        {
            return Err(Error::InvalidParameter {
                name: "seeds",
                message: "coordinates must be finite",
            });
        }
        Ok(())
    }

    fn initialize_clusters(&mut self, _items: &[Item]) -> Vec<Cluster> {
        self.seeds
            .iter()
            .enumerate()
            .map(|(i, &seed)| Cluster::means(ClusterId(i), seed))
            .collect()
    }

    fn next_iteration(&mut self, items: &[Item], previous: &Iteration) -> Option<Iteration> {
        let previous_clusters = previous.clusters();

        // 1. Assignment against the previous centers
        let mut members: Vec<Vec<Item>> = vec![Vec::new(); previous_clusters.len()];
        for item in items {
            if let Some(idx) = Self::closest_cluster(item, previous_clusters) {
                members[idx].push(*item);
            }
        }

        // 2. Recenter; an empty cluster keeps its previous center
        let clusters: Vec<Cluster> = previous_clusters
            .iter()
            .zip(members)
            .map(|(old, items)| {
                let old_center = old.center().unwrap_or_default();
                let center = centroid(items.iter().map(Item::position)).unwrap_or_else(|| {
                    warn!(
                        "{}: cluster {} lost all its items, keeping center {}",
                        Self::NAME,
                        old.id(),
                        old_center
                    );
                    old_center
                });
                Cluster::new(old.id(), items, ClusterKind::Means { center })
            })
            .collect();

        let next = Iteration::new(previous.order() + 1, clusters);
        if Self::converged(previous, &next) {
            return None;
        }
        Some(next)
    }
}

impl fmt::Display for KMeans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAME)
    }
}
