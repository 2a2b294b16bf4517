//! Serializable view of a whole session.

use crate::card::CardSnapshot;
use crate::ids::ProductId;
use crate::search::{CategoryFilter, SortKey};
use crate::selection::SelectionSnapshot;
use crate::settings::Theme;
use crate::toast::Toast;
use serde::{Deserialize, Serialize};

/// Everything the presentation surface needs to render the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Session clock in milliseconds.
    pub at_ms: u64,
    pub theme: Theme,
    pub filter: CategoryFilter,
    pub sort: SortKey,
    /// Projected product list, in display order.
    pub visible: Vec<ProductId>,
    pub selection: SelectionSnapshot,
    pub compare_tray: CompareTraySnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
    pub cards: Vec<CardSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareTraySnapshot {
    /// Compared products in catalog order.
    pub products: Vec<ProductId>,
    pub show_hint: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
