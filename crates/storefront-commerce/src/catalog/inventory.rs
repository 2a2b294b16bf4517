//! Stock level classification for display.
//!
//! The catalog carries a static stock snapshot; nothing here reserves or
//! decrements inventory.

use serde::{Deserialize, Serialize};

/// Below this many units the card shows an "Only N left!" warning.
pub const SCARCE_STOCK_THRESHOLD: u32 = 10;

/// Color band of the stock bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    /// More than half of total stock remains.
    High,
    /// More than a fifth remains.
    Medium,
    /// A fifth or less remains.
    Low,
}

impl StockLevel {
    /// Classify remaining stock against total stock.
    pub fn classify(stock: u32, total_stock: u32) -> Self {
        if total_stock == 0 {
            return StockLevel::Low;
        }
        let ratio = stock as f64 / total_stock as f64;
        if ratio > 0.5 {
            StockLevel::High
        } else if ratio > 0.2 {
            StockLevel::Medium
        } else {
            StockLevel::Low
        }
    }

    pub fn is_scarce(stock: u32) -> bool {
        stock < SCARCE_STOCK_THRESHOLD
    }

    /// Remaining stock as a percentage, 0 when total stock is 0.
    pub fn percentage(stock: u32, total_stock: u32) -> f64 {
        if total_stock == 0 {
            0.0
        } else {
            stock as f64 / total_stock as f64 * 100.0
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::High => "high",
            StockLevel::Medium => "medium",
            StockLevel::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bands() {
        assert_eq!(StockLevel::classify(60, 100), StockLevel::High);
        assert_eq!(StockLevel::classify(50, 100), StockLevel::Medium);
        assert_eq!(StockLevel::classify(21, 100), StockLevel::Medium);
        assert_eq!(StockLevel::classify(20, 100), StockLevel::Low);
        assert_eq!(StockLevel::classify(0, 0), StockLevel::Low);
    }

    #[test]
    fn test_scarcity() {
        assert!(StockLevel::is_scarce(9));
        assert!(!StockLevel::is_scarce(10));
    }

    #[test]
    fn test_percentage() {
        assert!((StockLevel::percentage(15, 60) - 25.0).abs() < f64::EPSILON);
        assert_eq!(StockLevel::percentage(3, 0), 0.0);
    }
}
