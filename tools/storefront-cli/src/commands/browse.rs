//! Product grid listing.

use anyhow::{Context as _, Result};
use serde::Serialize;
use storefront_commerce::catalog::Product;
use storefront_commerce::search::{CategoryFilter, SortKey};
use storefront_commerce::storefront::Intent;
use storefront_commerce::ProductId;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{badge_label, stock_badge};

/// Row of the JSON listing.
#[derive(Serialize)]
struct GridRow<'a> {
    id: ProductId,
    name: &'a str,
    category: &'a str,
    price: String,
    discount_percent: u32,
    rating: f64,
    stock: u32,
    stock_level: &'static str,
}

impl<'a> From<&'a Product> for GridRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: product.id,
            name: &product.name,
            category: &product.category,
            price: product.price.display(),
            discount_percent: product.discount_percent(),
            rating: product.rating,
            stock: product.stock,
            stock_level: product.stock_level().as_str(),
        }
    }
}

const WIDTHS: [usize; 7] = [4, 28, 12, 10, 6, 6, 8];

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let sort: SortKey = args.sort.parse().context("Invalid --sort")?;
    let category = CategoryFilter::from_label(args.category);

    let mut storefront = ctx.storefront()?;
    storefront.dispatch(Intent::FilterBy {
        category: category.clone(),
    });
    storefront.dispatch(Intent::SortBy { sort });

    let products = storefront.visible_products();

    if ctx.output.is_json() {
        let rows: Vec<GridRow<'_>> = products.iter().map(|p| GridRow::from(*p)).collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} ({}, {})",
        if category.is_all() { "All Products" } else { category.label() },
        sort.display_name(),
        products.len()
    ));

    if products.is_empty() {
        ctx.output.info("No products in this category.");
        return Ok(());
    }

    ctx.output.table_row(
        &["ID", "NAME", "CATEGORY", "PRICE", "OFF", "RATING", "STOCK"],
        &WIDTHS,
    );
    ctx.output.info(&"-".repeat(90));

    for product in &products {
        let id = product.id.to_string();
        let price = product.price.display();
        let discount = if product.is_on_sale() {
            format!("-{}%", product.discount_percent())
        } else {
            String::new()
        };
        let rating = format!("{:.1}", product.rating);
        let stock = stock_badge(product.stock_level());
        ctx.output.table_row(
            &[
                &id,
                &product.name,
                &product.category,
                &price,
                &discount,
                &rating,
                &stock,
            ],
            &WIDTHS,
        );
        if ctx.output.is_verbose() {
            if let Some(badge) = product.badge {
                ctx.output.kv("badge", &badge_label(Some(badge)));
            }
            if product.is_scarce() {
                ctx.output.kv("note", &format!("Only {} left", product.stock));
            }
        }
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {} of {} product(s)",
        products.len(),
        storefront.catalog().len()
    ));

    Ok(())
}
