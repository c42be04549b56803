use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub tags: Vec<String>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating an item
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One slice of a listing and the size of the full listing
#[derive(Debug, Clone)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total: usize,
}

/// In-memory item store
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: RwLock<Vec<Item>>,
}

impl ItemCatalog {
    /// Catalog pre-filled with `count` items; every seventh one is archived
    pub fn seeded(count: usize) -> Self {
        let items = (1..=count)
            .map(|n| Item {
                id: Uuid::new_v4(),
                name: format!("Item {n:03}"),
                tags: vec![if n % 2 == 0 { "even" } else { "odd" }.to_string()],
                archived: n % 7 == 0,
                created_at: Utc::now(),
            })
            .collect();

        Self {
            items: RwLock::new(items),
        }
    }

    pub fn insert(&self, req: CreateItemRequest) -> Item {
        let item = Item {
            id: Uuid::new_v4(),
            name: req.name,
            tags: req.tags,
            archived: false,
            created_at: Utc::now(),
        };
        self.items.write().push(item.clone());
        item
    }

    /// Items with the given archived flag, `offset`/`limit` applied after filtering
    pub fn list(&self, archived: bool, offset: usize, limit: usize) -> ItemPage {
        let items = self.items.read();
        let matching: Vec<&Item> = items.iter().filter(|i| i.archived == archived).collect();

        ItemPage {
            total: matching.len(),
            items: matching
                .into_iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
        }
    }

    pub fn ids(&self, offset: usize, limit: usize) -> (Vec<Uuid>, usize) {
        let items = self.items.read();
        let ids = items.iter().skip(offset).take(limit).map(|i| i.id).collect();
        (ids, items.len())
    }

    pub fn count(&self) -> usize {
        self.items.read().len()
    }

    /// Distinct tags, sorted
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .items
            .read()
            .iter()
            .flat_map(|i| i.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}
