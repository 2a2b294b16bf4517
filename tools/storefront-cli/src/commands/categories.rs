//! Category chips.

use anyhow::Result;
use storefront_commerce::search::{category_facets, CategoryFilter};

use crate::context::Context;

/// Run the categories command.
pub async fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let facets = category_facets(&catalog, &CategoryFilter::All);

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.header("Categories");
    for facet in &facets {
        ctx.output.table_row(&[&facet.value, &facet.count.to_string()], &[16, 6]);
    }

    Ok(())
}
