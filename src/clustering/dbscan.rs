//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # Stepwise region growing
//!
//! Classic DBSCAN floods a whole cluster in one go. Here every call to
//! [`Algorithm::next_iteration`] does one bounded unit of work so that the
//! growth of each cluster is visible in the history:
//!
//! - **Expanding** a cluster: every item added by the previous step that is a
//!   core point pulls its still-pending neighbors into the cluster. Those
//!   neighbors become the frontier for the next step.
//! - **Seeding**: when no cluster is being expanded (or the current one stopped
//!   growing), one pending item is drawn at random. A core point starts a new
//!   cluster with its pending neighbors; any other item becomes noise.
//!
//! The run ends once no item is pending.
//!
//! ## Core Concepts
//!
//! - **Distance threshold (ε)**: maximum distance between two neighbors.
//! - **Min points**: a core point has at least `min_points - 1` neighbors, the
//!   point itself counts towards the minimum.
//! - **Noise**: an item drawn as seed without being a core point, before any
//!   cluster claimed it. Noise is final.
//!
//! Because noise is final, the final partition depends on the draw order. A
//! border item (not core, but within reach of a core item) becomes noise if
//! it is drawn before any cluster reaches it, and joins that cluster
//! otherwise. Classic DBSCAN would always promote it to a border member.
//!
//! ## Complexity
//!
//! Neighborhoods are found with a direct scan over all items, O(n) per query.

use std::collections::HashSet;
use std::fmt;

use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::cluster::{Cluster, ClusterId};
use super::engine::Algorithm;
use super::item::{Item, ItemId};
use super::iteration::Iteration;
use super::point::distance;
use crate::error::{Error, Result};

/// DBSCAN clustering with a recorded growth history.
///
/// The random source used to pick seeds is injectable: use [`Dbscan::with_seed`]
/// or [`Dbscan::with_rng`] for reproducible runs.
///
/// Items drawn as noise are never re-claimed, so border items can end up as
/// noise or as members depending on the draw order (see the module docs).
///
/// # Example
///
/// ```
/// use stepwise_clustering::{Clustering, Dbscan, Item};
///
/// let items = Item::from_points(&[(0.0, 0.0), (0.5, 0.0), (9.0, 9.0), (30.0, 30.0)]);
/// let mut run = Clustering::new(items, Dbscan::with_seed(1.0, 2, 7)).unwrap();
/// run.compute().unwrap();
///
/// let last = run.final_iteration().unwrap();
/// assert_eq!(last.clusters().len(), 1);
/// assert_eq!(last.noise().unwrap().len(), 2);
/// assert!(last.pending().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Dbscan<R = ChaCha20Rng> {
    distance_threshold: f64,
    min_points: usize,
    rng: R,
    pending: Vec<Item>,
    noise: Vec<Item>,
    current_cluster: Option<ClusterId>,
    next_cluster_id: usize,
}

impl Dbscan<ChaCha20Rng> {
    /// Create a new DBSCAN clusterer with an entropy-seeded random source.
    ///
    /// # Arguments
    ///
    /// * `distance_threshold` - Maximum distance between two neighbors.
    /// * `min_points` - Minimum number of points, the core point included, to
    ///   form a dense region.
    pub fn new(distance_threshold: f64, min_points: usize) -> Self {
        Self::with_rng(distance_threshold, min_points, ChaCha20Rng::from_entropy())
    }

    /// Create a new DBSCAN clusterer whose seed picks are determined by `seed`.
    pub fn with_seed(distance_threshold: f64, min_points: usize, seed: u64) -> Self {
        Self::with_rng(distance_threshold, min_points, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Dbscan<R> {
    /// Create a new DBSCAN clusterer drawing seeds from `rng`.
    pub fn with_rng(distance_threshold: f64, min_points: usize, rng: R) -> Self {
        Self {
            distance_threshold,
            min_points,
            rng,
            pending: Vec::new(),
            noise: Vec::new(),
            current_cluster: None,
            next_cluster_id: 0,
        }
    }

    pub fn distance_threshold(&self) -> f64 {
        self.distance_threshold
    }

    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// All other items within the distance threshold, in input order.
    fn region_query(&self, items: &[Item], core: &Item) -> Vec<Item> {
        let position = core.position();
        items
            .iter()
            .filter(|other| {
                other.id() != core.id()
                    && distance(position, other.position()) <= self.distance_threshold
            })
            .copied()
            .collect()
    }

    /// MinPts includes the point itself.
    fn is_core(&self, neighborhood: &[Item]) -> bool {
        neighborhood.len() + 1 >= self.min_points
    }

    /// Removes the given items from `pending` and returns them in input order.
    fn take_pending(&mut self, ids: &HashSet<ItemId>) -> Vec<Item> {
        let (taken, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|item| ids.contains(&item.id()));
        self.pending = kept;
        taken
    }

    /// Grows cluster `id` by the pending neighbors of its core frontier items.
    /// Returns `false` if nothing was added.
    fn expand(
        &mut self,
        items: &[Item],
        previous: &Iteration,
        clusters: &mut [Cluster],
        id: ClusterId,
    ) -> bool {
        let frontier = previous
            .cluster(id)
            .map(Cluster::recently_added)
            .unwrap_or_default();

        let mut candidates = HashSet::new();
        for item in frontier {
            let neighborhood = self.region_query(items, item);
            if self.is_core(&neighborhood) {
                candidates.extend(neighborhood.iter().map(Item::id));
            }
        }

        let grown = self.take_pending(&candidates);
        if grown.is_empty() {
            return false;
        }
        trace!("{}: cluster {} grows by {} items", Self::NAME, id, grown.len());

        if let Some(cluster) = clusters.iter_mut().find(|cluster| cluster.id() == id) {
            let mut members = cluster.items().to_vec();
            members.extend_from_slice(&grown);
            *cluster = Cluster::scan(id, members, grown);
        }
        true
    }

    /// Draws one pending item and either starts a cluster from it or marks it
    /// as noise.
    fn seed(&mut self, items: &[Item], clusters: &mut Vec<Cluster>) {
        if self.pending.is_empty() {
            return;
        }
        let idx = self.rng.gen_range(0..self.pending.len());
        let seed = self.pending.remove(idx);

        let neighborhood = self.region_query(items, &seed);
        if !self.is_core(&neighborhood) {
            trace!("{}: {} is noise", Self::NAME, seed.id());
            self.noise.push(seed);
            return;
        }

        let ids: HashSet<ItemId> = neighborhood.iter().map(Item::id).collect();
        let claimed = self.take_pending(&ids);
        let id = ClusterId(self.next_cluster_id);
        self.next_cluster_id += 1;
        trace!(
            "{}: {} starts cluster {} with {} neighbors",
            Self::NAME,
            seed.id(),
            id,
            claimed.len()
        );

        let mut members = Vec::with_capacity(claimed.len() + 1);
        members.push(seed);
        members.extend_from_slice(&claimed);
        clusters.push(Cluster::scan(id, members, claimed));
        self.current_cluster = Some(id);
    }
}

impl<R: Rng> Algorithm for Dbscan<R> {
    const NAME: &'static str = "DB-Scan";

    fn validate(&self, _items: &[Item]) -> Result<()> {
        if !self.distance_threshold.is_finite() || self.distance_threshold <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "distance_threshold",
                message: "must be positive and finite",
            });
        }
        if self.min_points == 0 {
            return Err(Error::InvalidParameter {
                name: "min_points",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    fn initialize_clusters(&mut self, _items: &[Item]) -> Vec<Cluster> {
        Vec::new()
    }

    fn initial_iteration(&mut self, items: &[Item]) -> Iteration {
        self.pending = items.to_vec();
        self.noise.clear();
        self.current_cluster = None;
        self.next_cluster_id = 0;
        let clusters = self.initialize_clusters(items);
        Iteration::scan(0, clusters, self.pending.clone(), Vec::new())
    }

    fn next_iteration(&mut self, items: &[Item], previous: &Iteration) -> Option<Iteration> {
        if self.pending.is_empty() {
            return None;
        }

        // Clusters carry over unchanged, only the growth markers are reset.
        let mut clusters: Vec<Cluster> = previous
            .clusters()
            .iter()
            .map(|cluster| Cluster::scan(cluster.id(), cluster.items().to_vec(), Vec::new()))
            .collect();

        if let Some(id) = self.current_cluster {
            if !self.expand(items, previous, &mut clusters, id) {
                trace!("{}: cluster {} is complete", Self::NAME, id);
                self.current_cluster = None;
            }
        }
        if self.current_cluster.is_none() {
            self.seed(items, &mut clusters);
        }

        Some(Iteration::scan(
            previous.order() + 1,
            clusters,
            self.pending.clone(),
            self.noise.clone(),
        ))
    }
}

impl<R: Rng> fmt::Display for Dbscan<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAME)
    }
}
