//! Clustering algorithms with a recorded iteration history.
//!
//! Every algorithm here is driven by the same loop ([`Clustering::compute`]):
//! build iteration 0 from the algorithm's seeds, then keep asking the algorithm
//! for the next iteration until it reports that there is none. Iterations are
//! never modified once recorded, so the history can be replayed step by step.
//!
//! ## K-Means
//!
//! Assign each item to the nearest center, then move every center to the mean
//! of its members. Stops at the first step that changes neither the centers
//! nor the memberships.
//!
//! ## K-Medoids
//!
//! Same loop as K-Means, but the center of a cluster is always one of its
//! members: the member closest to the cluster mean.
//!
//! ## DBSCAN
//!
//! Density-based region growing. Each step does a bounded amount of work
//! (pick one seed, or grow the current cluster by one ring of neighbors), so
//! the history shows how every cluster grew.

pub mod cluster;
pub mod dbscan;
pub mod engine;
pub mod item;
pub mod iteration;
pub mod k_means;
pub mod k_medoids;
pub mod point;
pub mod samples;

// Re-export public types and functions
pub use cluster::{Cluster, ClusterId, ClusterKind};
pub use dbscan::Dbscan;
pub use engine::{Algorithm, Clustering};
pub use item::{Item, ItemId};
pub use iteration::{Iteration, IterationKind};
pub use k_means::KMeans;
pub use k_medoids::KMedoids;
pub use point::{centroid, distance, distance_sq, Point};
