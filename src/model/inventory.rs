use std::collections::HashSet;

/// Items the player has picked up. Only ever grows.
///
/// Display order is the order items were first acquired; equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Inventory::default().merged(items)
    }

    /// Set union with `items`. Items already held keep their position.
    pub fn merged<I>(&self, items: I) -> Inventory
    where
        I: IntoIterator<Item = String>,
    {
        let mut merged = self.items.clone();
        for item in items {
            if !merged.contains(&item) {
                merged.push(item);
            }
        }

        Inventory { items: merged }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    pub fn is_superset_of(&self, other: &Inventory) -> bool {
        other.items.iter().all(|i| self.contains(i))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PartialEq for Inventory {
    fn eq(&self, other: &Self) -> bool {
        let ours: HashSet<&String> = self.items.iter().collect();
        let theirs: HashSet<&String> = other.items.iter().collect();
        ours == theirs
    }
}

impl Eq for Inventory {}
