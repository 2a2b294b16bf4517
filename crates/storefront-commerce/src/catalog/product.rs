//! Product records and badge styling.

use crate::catalog::StockLevel;
use crate::ids::ProductId;
use crate::price::Price;
use serde::{Deserialize, Serialize};

/// Promotional badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    Hot,
    New,
    Limited,
    Sale,
}

/// Gradient endpoints used to paint a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeStyle {
    pub from: &'static str,
    pub to: &'static str,
}

impl BadgeStyle {
    /// Utility classes for the gradient (e.g., "from-red-500 to-orange-500").
    pub fn gradient_class(&self) -> String {
        format!("from-{} to-{}", self.from, self.to)
    }
}

impl Badge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::Hot => "Hot",
            Badge::New => "New",
            Badge::Limited => "Limited",
            Badge::Sale => "Sale",
        }
    }

    /// Style for this badge.
    pub fn style(&self) -> BadgeStyle {
        match self {
            Badge::Hot => BadgeStyle {
                from: "red-500",
                to: "orange-500",
            },
            Badge::Sale => BadgeStyle {
                from: "green-500",
                to: "emerald-500",
            },
            Badge::Limited => BadgeStyle {
                from: "purple-500",
                to: "pink-500",
            },
            Badge::New => BadgeStyle {
                from: "blue-500",
                to: "cyan-500",
            },
        }
    }
}

/// A color a product is offered in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorOption {
    /// Display name (e.g., "Midnight Black").
    pub name: String,
    /// Swatch color (e.g., "#1a1a1a").
    pub hex: String,
    /// Image showing the product in this color.
    pub image: String,
}

impl ColorOption {
    pub fn new(name: impl Into<String>, hex: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            image: image.into(),
        }
    }
}

/// A product in the catalog.
///
/// Products are immutable once the catalog is built; `Catalog::new`
/// enforces `price <= original_price`, `stock <= total_stock`, a
/// non-empty image list and a rating in 0-5.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable catalog key.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Marketing description.
    #[serde(default)]
    pub description: String,
    /// Current selling price.
    pub price: Price,
    /// Price before discount.
    pub original_price: Price,
    /// Image references, first one is the cover.
    pub images: Vec<String>,
    /// Offered colors.
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    /// Offered size labels.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Units left.
    pub stock: u32,
    /// Units at restock.
    pub total_stock: u32,
    /// Category label, used as the filter key.
    pub category: String,
    /// Average rating, 0-5.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews.
    #[serde(default)]
    pub reviews: u32,
    /// Shoppers currently viewing.
    #[serde(default)]
    pub viewing_now: u32,
    /// Delivery estimate (e.g., "2-3").
    #[serde(default)]
    pub delivery_days: String,
    #[serde(default)]
    pub free_shipping: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    /// Remaining offer time in milliseconds, relative to when it is observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_ends_in: Option<u64>,
}

impl Product {
    /// Create a product with one image, full stock of 10 and no discount.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Price,
    ) -> Self {
        let id = id.into();
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            original_price: price,
            images: vec![format!("/images/products/{}.jpg", id)],
            colors: Vec::new(),
            sizes: Vec::new(),
            stock: 10,
            total_stock: 10,
            category: category.into(),
            rating: 0.0,
            reviews: 0,
            viewing_now: 0,
            delivery_days: "3-5".to_string(),
            free_shipping: false,
            badge: None,
            offer_ends_in: None,
        }
    }

    pub fn with_original_price(mut self, original_price: Price) -> Self {
        self.original_price = original_price;
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors(mut self, colors: Vec<ColorOption>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stock(mut self, stock: u32, total_stock: u32) -> Self {
        self.stock = stock;
        self.total_stock = total_stock;
        self
    }

    pub fn with_rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn with_offer_ends_in(mut self, millis: u64) -> Self {
        self.offer_ends_in = Some(millis);
        self
    }

    /// Whole-number discount off the original price.
    pub fn discount_percent(&self) -> u32 {
        self.price.discount_percent_from(&self.original_price)
    }

    /// Check if the product sells below its original price.
    pub fn is_on_sale(&self) -> bool {
        self.price < self.original_price
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Stock bar level.
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.stock, self.total_stock)
    }

    /// Whether the "Only N left!" warning applies.
    pub fn is_scarce(&self) -> bool {
        StockLevel::is_scarce(self.stock)
    }

    /// Remaining stock as a percentage of total stock.
    pub fn stock_percentage(&self) -> f64 {
        StockLevel::percentage(self.stock, self.total_stock)
    }

    /// Index of a color by name.
    pub fn color_position(&self, name: &str) -> Option<usize> {
        self.colors.iter().position(|c| c.name == name)
    }

    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
