//! Inbound intents and outbound notifications.

use crate::ids::ProductId;
use crate::search::{CategoryFilter, SortKey};
use serde::{Deserialize, Serialize};

fn default_quantity() -> u32 {
    1
}

/// Something the shopper did.
///
/// The JSON form is tagged by `type`, e.g.
/// `{"type": "toggle_compare", "product_id": 3, "desired": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    FilterBy {
        category: CategoryFilter,
    },
    SortBy {
        sort: SortKey,
    },
    ToggleWishlist {
        product_id: ProductId,
    },
    AddToCart {
        product_id: ProductId,
        #[serde(default = "default_quantity")]
        quantity: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<String>,
    },
    ToggleCompare {
        product_id: ProductId,
        desired: bool,
    },
    RemoveFromCompare {
        product_id: ProductId,
    },
    OpenQuickView {
        product_id: ProductId,
    },
    CloseQuickView,
    SelectColor {
        name: String,
    },
    SelectSize {
        size: String,
    },
    SetQuantity {
        quantity: i64,
    },
    IncrementQuantity,
    DecrementQuantity,
    NextImage,
    PreviousImage,
    ShowImage {
        index: usize,
    },
    /// The quick view's "Add to Cart" button.
    ConfirmAddToCart,
    PointerEnter {
        product_id: ProductId,
    },
    PointerLeave {
        product_id: ProductId,
    },
    /// Pointer position relative to the card, each axis in 0..=1.
    PointerMove {
        product_id: ProductId,
        x: f64,
        y: f64,
    },
    ScrolledIntoView {
        product_id: ProductId,
    },
    DismissToast,
}

impl Intent {
    /// Quick add of one unit with no options.
    pub fn add_to_cart(product_id: impl Into<ProductId>) -> Self {
        Intent::AddToCart {
            product_id: product_id.into(),
            quantity: 1,
            color: None,
            size: None,
        }
    }

    /// Stable name used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::FilterBy { .. } => "filter_by",
            Intent::SortBy { .. } => "sort_by",
            Intent::ToggleWishlist { .. } => "toggle_wishlist",
            Intent::AddToCart { .. } => "add_to_cart",
            Intent::ToggleCompare { .. } => "toggle_compare",
            Intent::RemoveFromCompare { .. } => "remove_from_compare",
            Intent::OpenQuickView { .. } => "open_quick_view",
            Intent::CloseQuickView => "close_quick_view",
            Intent::SelectColor { .. } => "select_color",
            Intent::SelectSize { .. } => "select_size",
            Intent::SetQuantity { .. } => "set_quantity",
            Intent::IncrementQuantity => "increment_quantity",
            Intent::DecrementQuantity => "decrement_quantity",
            Intent::NextImage => "next_image",
            Intent::PreviousImage => "previous_image",
            Intent::ShowImage { .. } => "show_image",
            Intent::ConfirmAddToCart => "confirm_add_to_cart",
            Intent::PointerEnter { .. } => "pointer_enter",
            Intent::PointerLeave { .. } => "pointer_leave",
            Intent::PointerMove { .. } => "pointer_move",
            Intent::ScrolledIntoView { .. } => "scrolled_into_view",
            Intent::DismissToast => "dismiss_toast",
        }
    }

    /// Whether this intent changes the projected product list.
    pub fn reprojects(&self) -> bool {
        matches!(self, Intent::FilterBy { .. } | Intent::SortBy { .. })
    }
}

/// Something the presentation surface should react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    ToastShown { message: String, duration_ms: u64 },
    ToastDismissed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_json_is_tagged() {
        let intent: Intent =
            serde_json::from_str(r#"{"type": "toggle_compare", "product_id": 3, "desired": true}"#).unwrap();
        assert_eq!(
            intent,
            Intent::ToggleCompare {
                product_id: ProductId::new(3),
                desired: true
            }
        );
        assert_eq!(intent.kind(), "toggle_compare");
    }

    #[test]
    fn test_add_to_cart_defaults() {
        let intent: Intent = serde_json::from_str(r#"{"type": "add_to_cart", "product_id": 7}"#).unwrap();
        assert_eq!(intent, Intent::add_to_cart(7));
    }

    #[test]
    fn test_filter_and_sort_wire_forms() {
        let intent: Intent = serde_json::from_str(r#"{"type": "filter_by", "category": "all"}"#).unwrap();
        assert_eq!(
            intent,
            Intent::FilterBy {
                category: CategoryFilter::All
            }
        );
        let intent: Intent = serde_json::from_str(r#"{"type": "sort_by", "sort": "price-high"}"#).unwrap();
        assert!(intent.reprojects());
    }

    #[test]
    fn test_unit_intents() {
        let intent: Intent = serde_json::from_str(r#"{"type": "close_quick_view"}"#).unwrap();
        assert_eq!(intent, Intent::CloseQuickView);
        assert!(!intent.reprojects());
    }

    #[test]
    fn test_notification_json() {
        let json = serde_json::to_string(&Notification::ToastDismissed).unwrap();
        assert_eq!(json, r#"{"type":"toast_dismissed"}"#);
    }
}
