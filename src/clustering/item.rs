use std::fmt;
use std::hash::{Hash, Hasher};

use super::point::Point;

/// Identifier of an [`Item`]. Unique within one clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A uniquely identified point, the unit being clustered.
///
/// Items are immutable. Equality and hashing only look at the id, so two items
/// at the same position with different ids are distinct.
#[derive(Debug, Clone, Copy)]
pub struct Item {
    id: ItemId,
    x: f64,
    y: f64,
}

impl Item {
    pub fn new(id: ItemId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Builds one item per position, with ids `0..n` in input order.
    pub fn from_points(points: &[(f64, f64)]) -> Vec<Item> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Item::new(ItemId(i), x, y))
            .collect()
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
