//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// Categories form a tree of unbounded depth (observed depth is 2 in
/// the demo catalog). Slugs are unique across the whole tree.
/// Traversal belongs to the catalog store, which walks subtrees with
/// an explicit stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Category>,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
