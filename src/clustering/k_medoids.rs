//! K-Medoids: K-Means where every center is an actual member.
//!
//! Each step assigns items to the nearest medoid of the previous iteration,
//! then picks as new medoid the member closest to the cluster mean. The mean
//! is only used to rank members and is never stored.

use std::collections::HashSet;
use std::fmt;

use super::cluster::{Cluster, ClusterId};
use super::engine::Algorithm;
use super::item::{Item, ItemId};
use super::iteration::Iteration;
use super::point::{centroid, distance_sq};
use crate::error::{Error, Result};

/// K-Medoids clustering seeded with input items.
///
/// Cluster `i` starts with `seeds[i]` as its only member and medoid, and keeps
/// the id `ClusterId(i)` for the whole run.
#[derive(Debug, Clone)]
pub struct KMedoids {
    seeds: Vec<ItemId>,
}

impl KMedoids {
    pub fn new(seeds: Vec<ItemId>) -> Self {
        Self { seeds }
    }

    pub fn seeds(&self) -> &[ItemId] {
        &self.seeds
    }

    /// Index of the cluster whose medoid is nearest to `item`; first wins ties.
    fn closest_cluster(item: &Item, medoids: &[Option<Item>]) -> Option<usize> {
        let position = item.position();
        let mut best: Option<(usize, f64)> = None;
        for (idx, medoid) in medoids.iter().enumerate() {
            let Some(medoid) = medoid else {
                continue;
            };
            let dist = distance_sq(position, medoid.position());
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((idx, dist)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// The member closest to the mean of `members`; first in member order
    /// wins ties.
    fn select_medoid(members: &[Item]) -> Option<ItemId> {
        let mean = centroid(members.iter().map(Item::position))?;
        let mut best: Option<(ItemId, f64)> = None;
        for member in members {
            let dist = distance_sq(member.position(), mean);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((member.id(), dist)),
            }
        }
        best.map(|(id, _)| id)
    }

    fn same_cluster(previous: &Cluster, next: &Cluster) -> bool {
        previous.center_id() == next.center_id() && previous.same_members(next)
    }

    fn converged(previous: &Iteration, next: &Iteration) -> bool {
        previous.clusters().iter().all(|old| {
            next.cluster(old.id())
                .is_some_and(|new| Self::same_cluster(old, new))
        })
    }
}

impl Algorithm for KMedoids {
    const NAME: &'static str = "K-Medoids";

    fn validate(&self, items: &[Item]) -> Result<()> {
        if self.seeds.is_empty() {
            return Err(Error::NoSeeds);
        }
        let known: HashSet<ItemId> = items.iter().map(Item::id).collect();
        let mut seen = HashSet::with_capacity(self.seeds.len());
        for &seed in &self.seeds {
            if !known.contains(&seed) {
                return Err(Error::UnknownSeed(seed));
            }
            if !seen.insert(seed) {
                return Err(Error::DuplicateSeed(seed));
            }
        }
        Ok(())
    }

    fn initialize_clusters(&mut self, items: &[Item]) -> Vec<Cluster> {
        self.seeds
            .iter()
            .enumerate()
            .filter_map(|(i, &seed)| {
                let item = items.iter().find(|item| item.id() == seed)?;
                Some(Cluster::medoids(ClusterId(i), vec![*item], seed))
            })
            .collect()
    }

    fn next_iteration(&mut self, items: &[Item], previous: &Iteration) -> Option<Iteration> {
        let previous_clusters = previous.clusters();
        let medoids: Vec<Option<Item>> = previous_clusters
            .iter()
            .map(|cluster| cluster.medoid().copied())
            .collect();

        // 1. Assignment. A medoid always stays in its own cluster, so a
        // cluster can never lose its center.
        let mut members: Vec<Vec<Item>> = vec![Vec::new(); previous_clusters.len()];
        for item in items {
            let pinned = medoids
                .iter()
                .position(|medoid| medoid.is_some_and(|m| m.id() == item.id()));
            if let Some(idx) = pinned.or_else(|| Self::closest_cluster(item, &medoids)) {
                members[idx].push(*item);
            }
        }

        // 2. Pick the new medoids. Members are never empty here because the
        // previous medoid was pinned.
        let clusters = previous_clusters
            .iter()
            .zip(members)
            .map(|(old, items)| {
                let center_id = Self::select_medoid(&items)?;
                Some(Cluster::medoids(old.id(), items, center_id))
            })
            .collect::<Option<Vec<Cluster>>>()?;

        let next = Iteration::new(previous.order() + 1, clusters);
        if Self::converged(previous, &next) {
            return None;
        }
        Some(next)
    }
}

impl fmt::Display for KMedoids {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAME)
    }
}
