use std::collections::BTreeSet;
use std::fmt;

use super::item::{Item, ItemId};
use super::point::Point;

/// Identifier of a cluster. Stays the same for one logical cluster across
/// every iteration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(pub usize);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Algorithm-specific state attached to a cluster.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterKind {
    /// K-Means: a synthetic center, not necessarily any item's position.
    Means { center: Point },
    /// K-Medoids: the id of the member acting as center.
    Medoids { center_id: ItemId },
    /// DBSCAN: the members added by the most recent expansion step.
    Scan { recently_added: Vec<Item> },
}

/// A group of items inside one iteration.
///
/// Members are kept in the order they were added and are unique by item id.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: ClusterId,
    items: Vec<Item>,
    kind: ClusterKind,
}

impl Cluster {
    pub fn new(id: ClusterId, items: Vec<Item>, kind: ClusterKind) -> Self {
        Self { id, items, kind }
    }

    /// An empty K-Means cluster centered at `center`.
    pub fn means(id: ClusterId, center: Point) -> Self {
        Self::new(id, Vec::new(), ClusterKind::Means { center })
    }

    /// A K-Medoids cluster whose center is the member `center_id`.
    pub fn medoids(id: ClusterId, items: Vec<Item>, center_id: ItemId) -> Self {
        Self::new(id, items, ClusterKind::Medoids { center_id })
    }

    /// A DBSCAN cluster.
    pub fn scan(id: ClusterId, items: Vec<Item>, recently_added: Vec<Item>) -> Self {
        Self::new(id, items, ClusterKind::Scan { recently_added })
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn kind(&self) -> &ClusterKind {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn item_ids(&self) -> BTreeSet<ItemId> {
        self.items.iter().map(Item::id).collect()
    }

    /// Whether both clusters hold exactly the same items, regardless of order.
    pub fn same_members(&self, other: &Cluster) -> bool {
        self.items.len() == other.items.len() && self.item_ids() == other.item_ids()
    }

    /// The K-Means center, if this is a K-Means cluster.
    pub fn center(&self) -> Option<Point> {
        match self.kind {
            ClusterKind::Means { center } => Some(center),
            _ => None,
        }
    }

    /// The medoid id, if this is a K-Medoids cluster.
    pub fn center_id(&self) -> Option<ItemId> {
        match self.kind {
            ClusterKind::Medoids { center_id } => Some(center_id),
            _ => None,
        }
    }

    /// The member acting as medoid. Looked up from the members every time.
    pub fn medoid(&self) -> Option<&Item> {
        let center_id = self.center_id()?;
        self.items.iter().find(|item| item.id() == center_id)
    }

    /// Members added by the last DBSCAN step. Empty for other kinds.
    pub fn recently_added(&self) -> &[Item] {
        match &self.kind {
            ClusterKind::Scan { recently_added } => recently_added,
            _ => &[],
        }
    }

    /// Where the cluster is drawn: the K-Means center or the medoid's
    /// position. DBSCAN clusters have no anchor.
    pub fn anchor(&self) -> Option<Point> {
        match &self.kind {
            ClusterKind::Means { center } => Some(*center),
            ClusterKind::Medoids { .. } => self.medoid().map(Item::position),
            ClusterKind::Scan { .. } => None,
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        Item::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 2.0)])
    }

    #[test]
    fn test_medoid_is_looked_up_from_members() {
        let items = items();
        let cluster = Cluster::medoids(ClusterId(0), items.clone(), ItemId(2));

        assert_eq!(cluster.center_id(), Some(ItemId(2)));
        assert_eq!(cluster.medoid().map(Item::id), Some(ItemId(2)));
        assert_eq!(cluster.anchor(), Some(Point::new(2.0, 2.0)));
        assert_eq!(cluster.center(), None);

        let orphan = Cluster::medoids(ClusterId(1), items[..1].to_vec(), ItemId(2));
        assert!(orphan.medoid().is_none());
    }

    #[test]
    fn test_same_members_ignores_order() {
        let items = items();
        let a = Cluster::scan(ClusterId(0), items.clone(), Vec::new());
        let mut reversed = items.clone();
        reversed.reverse();
        let b = Cluster::scan(ClusterId(0), reversed, Vec::new());
        let c = Cluster::scan(ClusterId(0), items[..2].to_vec(), Vec::new());

        assert!(a.same_members(&b));
        assert!(!a.same_members(&c));
    }

    #[test]
    fn test_kind_accessors() {
        let means = Cluster::means(ClusterId(3), Point::new(1.5, -2.0));
        assert!(means.is_empty());
        assert_eq!(means.anchor(), Some(Point::new(1.5, -2.0)));
        assert!(means.recently_added().is_empty());
        assert_eq!(means.to_string(), "0");

        let items = items();
        let scan = Cluster::scan(ClusterId(0), items.clone(), items[1..].to_vec());
        assert_eq!(scan.recently_added().len(), 2);
        assert_eq!(scan.anchor(), None);
        assert!(scan.contains(ItemId(0)));
        assert!(!scan.contains(ItemId(9)));
    }
}
