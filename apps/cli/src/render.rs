//! # Text Output
//!
//! Plain-text renderings of command responses. `--json` bypasses this
//! module and prints the responses with `serde_json`.

use std::fmt::Write;

use ecocart_core::impact;

use crate::commands::cart::CartResponse;
use crate::commands::catalog::{CatalogOverview, ComparisonResponse, ProductDetail, ProductDto};

/// Filled and empty stars out of five.
pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn categories(categories: &[&str]) -> String {
    categories.join("\n")
}

fn product_line(p: &ProductDto<'_>) -> String {
    format!(
        "#{:<4} {:<32} {:>10}  {:>7.1} kg CO₂e  {:<6} {}",
        p.product.id.0,
        p.product.name,
        p.product.price.to_string(),
        p.product.carbon_footprint,
        p.tier.label(),
        stars(p.eco_rating)
    )
}

pub fn product_list(products: &[ProductDto<'_>]) -> String {
    if products.is_empty() {
        return "No products match.".to_string();
    }
    products
        .iter()
        .map(product_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn product_detail(detail: &ProductDetail<'_>) -> String {
    let p = detail.product.product;
    let mut out = String::new();

    let _ = writeln!(out, "{} (#{})", p.name, p.id);
    let _ = writeln!(out, "  Category:  {}", p.category);
    let _ = writeln!(out, "  Price:     {}", p.price);
    let _ = writeln!(
        out,
        "  Footprint: {:.1} kg CO₂e, {} ({})",
        p.carbon_footprint,
        detail.product.tier.label(),
        detail.product.tier.description()
    );
    let _ = writeln!(out, "  Rating:    {}", stars(detail.product.eco_rating));
    if let Some(image) = &p.image {
        let _ = writeln!(out, "  Image:     {}", image);
    }
    let _ = writeln!(out, "  {}", p.description);

    if !detail.alternatives.is_empty() {
        let _ = writeln!(out, "\nGreener alternatives:");
        for alt in &detail.alternatives {
            let _ = writeln!(out, "  {}", product_line(alt));
        }
    }

    out.trim_end().to_string()
}

pub fn comparison(response: &ComparisonResponse<'_>) -> String {
    let c = &response.comparison;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}: {:.1} kg CO₂e, {}",
        c.product.name, c.product.carbon_footprint, c.product.price
    );

    if c.alternatives.is_empty() {
        let _ = writeln!(out, "No alternatives listed.");
        return out.trim_end().to_string();
    }

    for alt in &c.alternatives {
        let marker = if c.best.map(|b| b.id) == Some(alt.id) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} #{:<4} {:<32} {:>7.1} kg CO₂e  {:>10}",
            marker,
            alt.id.0,
            alt.name,
            alt.carbon_footprint,
            alt.price.to_string()
        );
    }

    if let (Some(best), Some(kg)) = (c.best, c.savings_kg) {
        let _ = write!(out, "\nSwitching to {} saves {:.1} kg CO₂e", best.name, kg);
        if let Some(percent) = c.savings_percent {
            let _ = write!(out, " ({:.0}% less)", percent);
        }
        if let Some(miles) = response.driving_miles_saved {
            let _ = write!(out, ", about {:.0} miles of driving", miles);
        }
        out.push('.');
    }

    out.trim_end().to_string()
}

pub fn overview(overview: &CatalogOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} products in {} categories",
        overview.product_count, overview.category_count
    );
    let _ = writeln!(
        out,
        "{} products have greener alternatives",
        overview.alternatives_count
    );
    let _ = write!(
        out,
        "Potential savings: {:.1} kg CO₂e (~{:.0} miles of driving, {} trees)",
        overview.potential_savings, overview.potential_driving_miles, overview.potential_trees
    );
    out
}

pub fn cart(response: &CartResponse) -> String {
    if response.items.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let totals = &response.totals;
    let mut out = String::new();
    let _ = writeln!(out, "CART ({} items)", totals.total_items);

    for item in &response.items {
        let shown = item.display_product();
        let name = match &item.selected_alternative {
            Some(_) => format!("{} (for {})", shown.name, item.product.name),
            None => shown.name.clone(),
        };
        let _ = write!(
            out,
            "  #{:<4} {:<44} x{:<3} {:>10}",
            shown.id.0,
            name,
            item.quantity,
            item.line_total().to_string()
        );
        let savings = item.line_savings();
        if savings > 0.0 {
            let _ = write!(out, "  -{:.1} kg", savings);
        } else if savings < 0.0 {
            let _ = write!(out, "  +{:.1} kg", -savings);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Total:     {}", totals.total_price);
    let _ = writeln!(
        out,
        "Footprint: {:.1} kg CO₂e (~{:.0} miles of driving)",
        totals.total_carbon_footprint, totals.driving_miles
    );
    if totals.carbon_savings > 0.0 {
        let _ = writeln!(
            out,
            "Saved:     {:.1} kg CO₂e ({} trees)",
            totals.carbon_savings,
            impact::trees_equivalent(totals.carbon_savings)
        );
    } else if totals.carbon_savings < 0.0 {
        // Swaps that emit more than the product they replace.
        let _ = writeln!(
            out,
            "Extra:     {:.1} kg CO₂e over the original products",
            -totals.carbon_savings
        );
    }

    out.trim_end().to_string()
}
