//! The iteration loop shared by every algorithm.
//!
//! An [`Algorithm`] only knows how to build the seed iteration and how to turn
//! one iteration into the next. [`Clustering`] owns the items and the history
//! and drives the algorithm until it signals that it is done.

use std::collections::HashSet;
use std::fmt;

use log::{debug, info};

use super::cluster::{Cluster, ClusterId};
use super::item::Item;
use super::iteration::Iteration;
use super::point::Point;
use crate::error::{Error, Result};

/// Step protocol implemented by each clustering algorithm.
pub trait Algorithm {
    /// Human-readable name, e.g. for labels.
    const NAME: &'static str;

    /// Checks the algorithm's parameters against the items it will run on.
    fn validate(&self, _items: &[Item]) -> Result<()> {
        Ok(())
    }

    /// The clusters of iteration 0.
    fn initialize_clusters(&mut self, items: &[Item]) -> Vec<Cluster>;

    /// Iteration 0. Algorithms with extra bookkeeping override this.
    fn initial_iteration(&mut self, items: &[Item]) -> Iteration {
        Iteration::new(0, self.initialize_clusters(items))
    }

    /// Builds the iteration following `previous`, or returns `None` once the
    /// algorithm is done. The returned iteration has order
    /// `previous.order() + 1`.
    fn next_iteration(&mut self, items: &[Item], previous: &Iteration) -> Option<Iteration>;
}

/// One clustering run: the input items, the algorithm, and the history it
/// produced.
///
/// A run is computed once. Construct a new one to cluster again.
#[derive(Debug, Clone)]
pub struct Clustering<A> {
    items: Vec<Item>,
    algorithm: A,
    history: Vec<Iteration>,
    max_iterations: Option<usize>,
    computed: bool,
}

impl<A: Algorithm> Clustering<A> {
    /// Creates a run over `items`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `items` is empty.
    /// - [`Error::DuplicateItem`] if two items share an id.
    /// - [`Error::NonFiniteItem`] if an item has a NaN or infinite coordinate.
    /// - Any error from [`Algorithm::validate`].
    pub fn new(items: Vec<Item>, algorithm: A) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !item.x().is_finite() || !item.y().is_finite() {
                return Err(Error::NonFiniteItem(item.id()));
            }
            if !seen.insert(item.id()) {
                return Err(Error::DuplicateItem(item.id()));
            }
        }
        algorithm.validate(&items)?;

        Ok(Self {
            items,
            algorithm,
            history: Vec::new(),
            max_iterations: None,
            computed: false,
        })
    }

    /// Fails the run with [`Error::IterationLimit`] if it needs more than
    /// `max_iterations` steps after iteration 0. Unbounded by default.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Runs the algorithm to completion and returns the history.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyComputed`] on any call after the first.
    /// - [`Error::IterationLimit`] if the configured cap is exceeded. The
    ///   history stays empty in that case.
    pub fn compute(&mut self) -> Result<&[Iteration]> {
        if self.computed {
            return Err(Error::AlreadyComputed);
        }
        self.computed = true;

        let mut history = Vec::new();
        let mut current = self.algorithm.initial_iteration(&self.items);
        debug!(
            "{}: seeded iteration 0 with {} clusters",
            A::NAME,
            current.clusters().len()
        );

        loop {
            let next = self.algorithm.next_iteration(&self.items, &current);
            history.push(current);

            let Some(next) = next else { break };
            debug_assert_eq!(next.order(), history.len());
            if let Some(limit) = self.max_iterations {
                if next.order() > limit {
                    return Err(Error::IterationLimit { limit });
                }
            }
            debug!(
                "{}: iteration {} with {} clusters",
                A::NAME,
                next.order(),
                next.clusters().len()
            );
            current = next;
        }

        info!(
            "{}: finished after {} iterations over {} items",
            A::NAME,
            history.len(),
            self.items.len()
        );
        self.history = history;
        Ok(&self.history)
    }

    pub fn name(&self) -> &'static str {
        A::NAME
    }

    /// The input items, in input order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Every recorded iteration, ordered by `order`. Empty before `compute`.
    pub fn history(&self) -> &[Iteration] {
        &self.history
    }

    /// Whether `compute` was called, including runs that failed. A failed
    /// run has an empty history.
    pub fn is_computed(&self) -> bool {
        self.computed
    }

    pub fn iteration_count(&self) -> usize {
        self.history.len()
    }

    pub fn iteration(&self, order: usize) -> Option<&Iteration> {
        self.history.get(order)
    }

    pub fn final_iteration(&self) -> Option<&Iteration> {
        self.history.last()
    }

    /// Positions of one cluster's anchor (center or medoid) in every
    /// iteration up to and including `up_to_order`. Iterations where the
    /// cluster is absent or has no anchor are skipped.
    pub fn cluster_path(&self, id: ClusterId, up_to_order: usize) -> Vec<Point> {
        self.history
            .iter()
            .take_while(|iteration| iteration.order() <= up_to_order)
            .filter_map(|iteration| iteration.cluster(id))
            .filter_map(Cluster::anchor)
            .collect()
    }
}

impl<A: Algorithm> fmt::Display for Clustering<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(A::NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::ItemId;

    /// Moves a single center one unit to the right per step, `steps` times.
    #[derive(Debug)]
    struct Walker {
        steps: usize,
    }

    impl Algorithm for Walker {
        const NAME: &'static str = "Walker";

        fn validate(&self, items: &[Item]) -> Result<()> {
            if items.len() > 10 {
                return Err(Error::InvalidParameter {
                    name: "items",
                    message: "too many",
                });
            }
            Ok(())
        }

        fn initialize_clusters(&mut self, _items: &[Item]) -> Vec<Cluster> {
            vec![Cluster::means(ClusterId(0), Point::new(0.0, 0.0))]
        }

        fn next_iteration(&mut self, _items: &[Item], previous: &Iteration) -> Option<Iteration> {
            if previous.order() == self.steps {
                return None;
            }
            let x = previous.order() as f64 + 1.0;
            Some(Iteration::new(
                previous.order() + 1,
                vec![Cluster::means(ClusterId(0), Point::new(x, 0.0))],
            ))
        }
    }

    fn items() -> Vec<Item> {
        Item::from_points(&[(0.0, 0.0), (1.0, 1.0)])
    }

    #[test]
    fn test_compute_records_every_step() {
        let mut run = Clustering::new(items(), Walker { steps: 3 }).unwrap();
        assert!(!run.is_computed());

        let history = run.compute().unwrap();
        let orders: Vec<usize> = history.iter().map(Iteration::order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);

        assert_eq!(run.iteration_count(), 4);
        assert_eq!(run.final_iteration().map(Iteration::order), Some(3));
        assert_eq!(run.iteration(2).map(Iteration::order), Some(2));
        assert!(run.iteration(4).is_none());
        assert_eq!(run.to_string(), "Walker");
    }

    #[test]
    fn test_cluster_path() {
        let mut run = Clustering::new(items(), Walker { steps: 3 }).unwrap();
        run.compute().unwrap();

        let path = run.cluster_path(ClusterId(0), 2);
        assert_eq!(
            path,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)]
        );
        assert!(run.cluster_path(ClusterId(5), 3).is_empty());
    }

    #[test]
    fn test_compute_twice_fails() {
        let mut run = Clustering::new(items(), Walker { steps: 1 }).unwrap();
        run.compute().unwrap();
        assert_eq!(run.compute().unwrap_err(), Error::AlreadyComputed);
        assert_eq!(run.iteration_count(), 2);
    }

    #[test]
    fn test_iteration_limit() {
        let mut run = Clustering::new(items(), Walker { steps: 5 })
            .unwrap()
            .with_max_iterations(3);
        assert_eq!(
            run.compute().unwrap_err(),
            Error::IterationLimit { limit: 3 }
        );
        assert!(run.history().is_empty());
        assert!(run.is_computed());
        assert_eq!(run.compute().unwrap_err(), Error::AlreadyComputed);

        let mut exact = Clustering::new(items(), Walker { steps: 3 })
            .unwrap()
            .with_max_iterations(3);
        assert_eq!(exact.compute().unwrap().len(), 4);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert_eq!(
            Clustering::new(Vec::new(), Walker { steps: 1 }).unwrap_err(),
            Error::EmptyInput
        );

        let mut duplicated = items();
        duplicated.push(duplicated[0]);
        assert_eq!(
            Clustering::new(duplicated, Walker { steps: 1 }).unwrap_err(),
            Error::DuplicateItem(ItemId(0))
        );

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let items = Item::from_points(&[(1.0, 0.0), (bad, 0.0)]);
            assert_eq!(
                Clustering::new(items, Walker { steps: 1 }).unwrap_err(),
                Error::NonFiniteItem(ItemId(1))
            );
            let items = Item::from_points(&[(0.0, bad)]);
            assert_eq!(
                Clustering::new(items, Walker { steps: 1 }).unwrap_err(),
                Error::NonFiniteItem(ItemId(0))
            );
        }

        let many = Item::from_points(&[(0.0, 0.0); 11]);
        assert!(matches!(
            Clustering::new(many, Walker { steps: 1 }),
            Err(Error::InvalidParameter { name: "items", .. })
        ));
    }
}
