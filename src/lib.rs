//! Stepwise clustering.
//!
//! K-Means, K-Medoids and DBSCAN over 2D items, recording every intermediate
//! step as an immutable [`Iteration`] so the whole run can be replayed.
//!
//! ```
//! use stepwise_clustering::{Clustering, Item, KMeans, Point};
//!
//! let items = Item::from_points(&[(0.0, 0.0), (0.5, 0.0), (9.0, 9.0), (9.5, 9.0)]);
//! let seeds = vec![Point::new(1.0, 1.0), Point::new(8.0, 8.0)];
//!
//! let mut run = Clustering::new(items, KMeans::new(seeds)).unwrap();
//! let history = run.compute().unwrap();
//!
//! assert_eq!(history[0].order(), 0);
//! assert_eq!(history.last().unwrap().clusters().len(), 2);
//! ```

#![forbid(unsafe_code)]

pub mod clustering;
pub mod error;

pub use clustering::{
    Algorithm, Cluster, ClusterId, ClusterKind, Clustering, Dbscan, Item, ItemId, Iteration,
    IterationKind, KMeans, KMedoids, Point,
};
pub use error::{Error, Result};
