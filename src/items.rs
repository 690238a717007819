use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
        }
    }
}

/// What a store mutation did, returned to the caller so views can follow along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Added { id: Uuid, index: usize },
    Removed { item: Item, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no item at position {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no item with id {0}")]
    UnknownId(Uuid),
}

/// The ordered list of items the user picks from.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, title: &str) -> StoreChange {
        let item = Item::new(title.trim());
        let change = StoreChange::Added {
            id: item.id,
            index: self.items.len(),
        };
        info!(title = %item.title, count = self.items.len() + 1, "item added");
        self.items.push(item);
        change
    }

    pub fn remove(&mut self, index: usize) -> Result<StoreChange, StoreError> {
        if index >= self.items.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let item = self.items.remove(index);
        info!(title = %item.title, count = self.items.len(), "item removed");
        Ok(StoreChange::Removed { item, index })
    }

    pub fn remove_id(&mut self, id: Uuid) -> Result<StoreChange, StoreError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::UnknownId(id))?;
        self.remove(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Picking needs a real choice, so at least two items.
    pub fn can_pick(&self) -> bool {
        self.items.len() > 1
    }

    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }
}
