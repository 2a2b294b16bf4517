//! Price type for catalog amounts.
//!
//! Uses a cents-based integer representation so that sorting and
//! discount math never see floating-point noise. Catalog data arrives as
//! decimal numbers (`299.99`) and is rounded to the nearest cent on load.
//! No currency is attached: the storefront renders a single unlabelled
//! amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A price in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Price {
    /// Amount in cents.
    pub cents: i64,
}

impl Price {
    /// Create a price from cents.
    pub const fn new(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a price from a decimal amount.
    ///
    /// ```
    /// use storefront_commerce::price::Price;
    /// let price = Price::from_decimal(49.99);
    /// assert_eq!(price.cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * 100.0).round() as i64)
    }

    /// A zero price.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Format with two decimal places (e.g., "49.99").
    pub fn display(&self) -> String {
        format!("{:.2}", self.to_decimal())
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Price> {
        self.cents.checked_mul(factor).map(Price::new)
    }

    /// Sum an iterator of prices, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Price>) -> Option<Price> {
        iter.try_fold(Price::zero(), |acc, p| acc.cents.checked_add(p.cents).map(Price::new))
    }

    /// Whole-number percentage saved relative to `original`.
    ///
    /// Rounds half away from zero, and returns 0 when `original` is not
    /// positive.
    pub fn discount_percent_from(&self, original: &Price) -> u32 {
        if original.cents <= 0 || self.cents >= original.cents {
            return 0;
        }
        let saved = (original.cents - self.cents) as f64;
        ((saved / original.cents as f64) * 100.0).round() as u32
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Price::from_decimal(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.to_decimal()
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, other: Price) -> Price {
        Price::new(self.cents + other.cents)
    }
}

impl Sub for Price {
    type Output = Price;

    fn sub(self, other: Price) -> Price {
        Price::new(self.cents - other.cents)
    }
}

impl Mul<i64> for Price {
    type Output = Price;

    fn mul(self, factor: i64) -> Price {
        Price::new(self.cents * factor)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_decimal() {
        assert_eq!(Price::from_decimal(49.99).cents, 4999);
        assert_eq!(Price::from_decimal(0.1 + 0.2).cents, 30);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(4999).display(), "49.99");
        assert_eq!(Price::new(100).to_string(), "1.00");
    }

    #[test]
    fn test_price_ordering() {
        assert!(Price::new(100) < Price::new(200));
    }

    #[test]
    fn test_price_arithmetic() {
        let a = Price::new(1000);
        let b = Price::new(300);
        assert_eq!((a + b).cents, 1300);
        assert_eq!((a - b).cents, 700);
        assert_eq!((a * 3).cents, 3000);
    }

    #[test]
    fn test_try_multiply_overflow() {
        assert!(Price::new(i64::MAX).try_multiply(2).is_none());
        assert_eq!(Price::new(250).try_multiply(4), Some(Price::new(1000)));
    }

    #[test]
    fn test_try_sum() {
        let prices = [Price::new(100), Price::new(250)];
        assert_eq!(Price::try_sum(prices.iter()), Some(Price::new(350)));
        assert_eq!(Price::try_sum(std::iter::empty()), Some(Price::zero()));
    }

    #[test]
    fn test_try_sum_overflow() {
        let prices = [Price::new(i64::MAX), Price::new(1)];
        assert!(Price::try_sum(prices.iter()).is_none());
    }

    #[test]
    fn test_discount_percent() {
        let price = Price::from_decimal(199.99);
        let original = Price::from_decimal(299.99);
        assert_eq!(price.discount_percent_from(&original), 33);
        assert_eq!(original.discount_percent_from(&original), 0);
        assert_eq!(price.discount_percent_from(&Price::zero()), 0);
    }

    #[test]
    fn test_price_json_is_decimal() {
        let price: Price = serde_json::from_str("129.5").unwrap();
        assert_eq!(price.cents, 12950);
        assert_eq!(serde_json::to_string(&price).unwrap(), "129.5");
    }
}
