use std::fmt;

use super::cluster::{Cluster, ClusterId};
use super::item::{Item, ItemId};

/// Extra bookkeeping carried by an iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum IterationKind {
    /// K-Means and K-Medoids: the clusters are the whole state.
    Partition,
    /// DBSCAN: items still waiting to be classified, and items classified as
    /// noise so far.
    Scan { pending: Vec<Item>, noise: Vec<Item> },
}

/// An immutable snapshot of one step of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct Iteration {
    order: usize,
    clusters: Vec<Cluster>,
    kind: IterationKind,
}

impl Iteration {
    pub fn new(order: usize, clusters: Vec<Cluster>) -> Self {
        Self {
            order,
            clusters,
            kind: IterationKind::Partition,
        }
    }

    pub fn scan(
        order: usize,
        clusters: Vec<Cluster>,
        pending: Vec<Item>,
        noise: Vec<Item>,
    ) -> Self {
        Self {
            order,
            clusters,
            kind: IterationKind::Scan { pending, noise },
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn kind(&self) -> &IterationKind {
        &self.kind
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id() == id)
    }

    /// The cluster holding the given item, if any.
    pub fn cluster_of(&self, id: ItemId) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.contains(id))
    }

    pub fn cluster_ids(&self) -> Vec<ClusterId> {
        self.clusters.iter().map(Cluster::id).collect()
    }

    /// Unclassified items. `None` outside DBSCAN.
    pub fn pending(&self) -> Option<&[Item]> {
        match &self.kind {
            IterationKind::Scan { pending, .. } => Some(pending.as_slice()),
            IterationKind::Partition => None,
        }
    }

    /// Items classified as noise. `None` outside DBSCAN.
    pub fn noise(&self) -> Option<&[Item]> {
        match &self.kind {
            IterationKind::Scan { noise, .. } => Some(noise.as_slice()),
            IterationKind::Partition => None,
        }
    }

    /// One label per item of `items`, in the same order. `None` for items
    /// that are in no cluster (noise, pending, or not assigned yet).
    pub fn labels(&self, items: &[Item]) -> Vec<Option<ClusterId>> {
        items
            .iter()
            .map(|item| self.cluster_of(item.id()).map(Cluster::id))
            .collect()
    }
}

impl fmt::Display for Iteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.order)
    }
}
