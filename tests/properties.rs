use std::collections::BTreeSet;

use proptest::prelude::*;
use stepwise_clustering::clustering::Algorithm;
use stepwise_clustering::{Clustering, Dbscan, Item, ItemId, Iteration, KMeans, KMedoids, Point};

fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((-50i32..50, -50i32..50), 1..40).prop_map(|coords| {
        let points: Vec<(f64, f64)> = coords
            .into_iter()
            .map(|(x, y)| (f64::from(x) / 2.0, f64::from(y) / 2.0))
            .collect();
        Item::from_points(&points)
    })
}

fn seeds_strategy() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-25.0f64..25.0, -25.0f64..25.0), 1..5)
        .prop_map(|coords| coords.into_iter().map(Point::from).collect())
}

fn all_ids(items: &[Item]) -> BTreeSet<ItemId> {
    items.iter().map(Item::id).collect()
}

/// Every item in exactly one cluster.
fn assert_partition(iteration: &Iteration, items: &[Item]) -> Result<(), TestCaseError> {
    let mut seen = BTreeSet::new();
    for cluster in iteration.clusters() {
        for item in cluster.items() {
            prop_assert!(seen.insert(item.id()), "{} in two clusters", item.id());
        }
    }
    prop_assert_eq!(seen, all_ids(items));
    Ok(())
}

fn assert_stable_ids(history: &[Iteration]) -> Result<(), TestCaseError> {
    let ids = history[0].cluster_ids();
    for iteration in history {
        prop_assert_eq!(iteration.cluster_ids(), ids.clone());
    }
    Ok(())
}

proptest! {
    #[test]
    fn kmeans_ends_at_a_fixed_point(items in items_strategy(), seeds in seeds_strategy()) {
        let mut run = Clustering::new(items.clone(), KMeans::new(seeds.clone()))
            .unwrap()
            .with_max_iterations(1000);
        let history = run.compute().unwrap();

        for (order, iteration) in history.iter().enumerate() {
            prop_assert_eq!(iteration.order(), order);
        }
        for iteration in &history[1..] {
            assert_partition(iteration, &items)?;
        }
        assert_stable_ids(history)?;

        let mut step = KMeans::new(seeds);
        prop_assert!(step.next_iteration(&items, history.last().unwrap()).is_none());
    }

    #[test]
    fn kmedoids_medoid_is_a_member(items in items_strategy(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4)) {
        let mut seeds: Vec<ItemId> = picks.iter().map(|pick| items[pick.index(items.len())].id()).collect();
        seeds.sort();
        seeds.dedup();

        let mut run = Clustering::new(items.clone(), KMedoids::new(seeds))
            .unwrap()
            .with_max_iterations(1000);
        let history = run.compute().unwrap();

        for iteration in history {
            for cluster in iteration.clusters() {
                let center = cluster.center_id().unwrap();
                prop_assert!(cluster.contains(center));
            }
        }
        for iteration in &history[1..] {
            assert_partition(iteration, &items)?;
        }
        assert_stable_ids(history)?;
    }

    #[test]
    fn dbscan_accounts_for_every_item(
        items in items_strategy(),
        threshold in 0.5f64..6.0,
        min_points in 1usize..6,
        seed in any::<u64>(),
    ) {
        let n = items.len();
        let mut run = Clustering::new(items.clone(), Dbscan::with_seed(threshold, min_points, seed)).unwrap();
        let history = run.compute().unwrap();

        prop_assert!(history.len() <= n + 1);
        for pair in history.windows(2) {
            // Pending shrinks every step and nothing re-enters it.
            let pending_before: BTreeSet<ItemId> = pair[0].pending().unwrap().iter().map(Item::id).collect();
            let pending_after: BTreeSet<ItemId> = pair[1].pending().unwrap().iter().map(Item::id).collect();
            prop_assert!(pending_after.len() < pending_before.len());
            prop_assert!(pending_after.is_subset(&pending_before));

            // Noise only ever grows.
            let noise_before: BTreeSet<ItemId> = pair[0].noise().unwrap().iter().map(Item::id).collect();
            let noise_after: BTreeSet<ItemId> = pair[1].noise().unwrap().iter().map(Item::id).collect();
            prop_assert!(noise_before.is_subset(&noise_after));
        }

        // Pending, noise and the clusters partition the items at every step.
        for iteration in history {
            let mut seen = BTreeSet::new();
            let members = iteration.clusters().iter().flat_map(|c| c.items());
            let pending = iteration.pending().unwrap().iter();
            let noise = iteration.noise().unwrap().iter();
            for item in members.chain(pending).chain(noise) {
                prop_assert!(seen.insert(item.id()), "{} counted twice", item.id());
            }
            prop_assert_eq!(seen, all_ids(&items));
        }

        let last = history.last().unwrap();
        prop_assert!(last.pending().unwrap().is_empty());
        if min_points == 1 {
            prop_assert!(last.noise().unwrap().is_empty());
        }
    }
}
