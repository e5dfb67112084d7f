//! Ready-made datasets for demos, tests and benchmarks.

use super::item::{Item, ItemId};
use super::point::Point;

/// Eleven items in two well separated groups: four around (4, 5) and seven
/// around (-5, -1.5).
pub fn two_blobs() -> Vec<Item> {
    Item::from_points(&[
        (4.0, 5.0),
        (3.0, 7.0),
        (4.5, 4.0),
        (5.0, 6.0),
        (-1.0, -1.0),
        (-4.0, -3.0),
        (-4.0, -1.5),
        (-5.0, -1.0),
        (-5.0, -2.0),
        (-6.0, -1.0),
        (-6.0, -2.0),
    ])
}

/// A star of lines through the origin surrounded by a square frame two
/// items thick. Some positions are generated twice; those are distinct items.
pub fn cross_and_frame() -> Vec<Item> {
    const CENTER_WIDTH: i32 = 3;
    const EDGE_START: i32 = 7;
    const EDGE_WIDTH: i32 = 2;

    let mut points = Vec::new();
    for i in -CENTER_WIDTH..=CENTER_WIDTH {
        points.push((i, 0));
        points.push((0, i));
        if i > -CENTER_WIDTH && i < CENTER_WIDTH && i != 0 {
            points.push((i, i));
            points.push((-i, i));
        }
    }
    for i in -EDGE_START..=EDGE_START {
        for j in 0..EDGE_WIDTH {
            points.push((EDGE_START + j, i));
            points.push((-(EDGE_START + j), i));
            points.push((i, EDGE_START + j));
            points.push((i, -(EDGE_START + j)));
        }
    }

    let points: Vec<(f64, f64)> = points
        .into_iter()
        .map(|(x, y)| (f64::from(x), f64::from(y)))
        .collect();
    Item::from_points(&points)
}

/// K-Means seeds used with the samples above.
pub fn means_seeds() -> Vec<Point> {
    vec![Point::new(2.0, 3.0), Point::new(-6.0, -3.0)]
}

/// K-Medoids seeds used with the samples above: the items at index 4 and 7.
pub fn medoid_seeds(items: &[Item]) -> Vec<ItemId> {
    [4, 7]
        .iter()
        .filter_map(|&idx| items.get(idx).map(Item::id))
        .collect()
}
