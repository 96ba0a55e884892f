//! # Domain Types
//!
//! Core domain types used throughout EcoCart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │    Product      │   │      CartItem        │   │  FootprintTier  │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  id             │◄──│  product             │   │  Low    ≤ 5     │  │
//! │  │  price          │   │  quantity (≥ 1)      │   │  Medium ≤ 15    │  │
//! │  │  carbon_        │◄──│  selected_alternative│   │  High   > 15    │  │
//! │  │    footprint    │   └──────────────────────┘   └─────────────────┘  │
//! │  │  alternatives   │             │                                      │
//! │  └─────────────────┘             ▼                                      │
//! │                       LineKey (product id, alternative id | none)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Products arrive as camelCase JSON records (`carbonFootprint`, decimal
//! `price`), and cart items are persisted in the same shape, so every type
//! here round-trips through `serde_json` unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{LOW_FOOTPRINT_MAX_KG, MEDIUM_FOOTPRINT_MAX_KG};

// =============================================================================
// Product Id
// =============================================================================

/// Unique catalog key of a product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Footprint Tier
// =============================================================================

/// Three-tier severity of a carbon-footprint value.
///
/// This is the single source of truth for "how bad is this number": the
/// catalog filter compares against it, and listings badge products with it.
///
/// ```text
///   0 ────────── 5 ────────────── 15 ──────────────►  kg CO₂e
///   │    Low     │     Medium      │      High
///   └── ≤ 5 ─────┴── > 5 and ≤ 15 ─┴── > 15
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FootprintTier {
    Low,
    Medium,
    High,
}

impl FootprintTier {
    /// Classifies a footprint value.
    ///
    /// ## Example
    /// ```rust
    /// use ecocart_core::FootprintTier;
    ///
    /// assert_eq!(FootprintTier::classify(5.0), FootprintTier::Low);
    /// assert_eq!(FootprintTier::classify(5.01), FootprintTier::Medium);
    /// assert_eq!(FootprintTier::classify(15.0), FootprintTier::Medium);
    /// assert_eq!(FootprintTier::classify(15.01), FootprintTier::High);
    /// ```
    pub fn classify(kg_co2e: f64) -> Self {
        if kg_co2e <= LOW_FOOTPRINT_MAX_KG {
            FootprintTier::Low
        } else if kg_co2e <= MEDIUM_FOOTPRINT_MAX_KG {
            FootprintTier::Medium
        } else {
            FootprintTier::High
        }
    }

    /// All tiers, greenest first.
    pub const ALL: [FootprintTier; 3] = [
        FootprintTier::Low,
        FootprintTier::Medium,
        FootprintTier::High,
    ];

    /// Label used in filters and badges.
    pub const fn label(&self) -> &'static str {
        match self {
            FootprintTier::Low => "Low",
            FootprintTier::Medium => "Medium",
            FootprintTier::High => "High",
        }
    }

    /// Longer description of the tier's range.
    pub const fn description(&self) -> &'static str {
        match self {
            FootprintTier::Low => "Low Impact (≤5 kg CO₂)",
            FootprintTier::Medium => "Medium Impact (5-15 kg CO₂)",
            FootprintTier::High => "High Impact (>15 kg CO₂)",
        }
    }

    /// Star rating (out of five) shown on product details.
    pub const fn eco_rating(&self) -> u8 {
        match self {
            FootprintTier::Low => 5,
            FootprintTier::Medium => 3,
            FootprintTier::High => 2,
        }
    }
}

impl fmt::Display for FootprintTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FootprintTier {
    type Err = ValidationError;

    /// Parses a tier label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FootprintTier::ALL
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "tier".to_string(),
                reason: format!("'{}' is not one of Low, Medium, High", s),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique catalog key.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Category tag, e.g. "Clothing".
    pub category: String,

    /// Image URL for listings. Carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,

    /// Unit price.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Footprint per unit, kg CO₂e. Treated as an opaque input figure.
    pub carbon_footprint: f64,

    pub description: String,

    /// Ids of lower-footprint substitutes, in display order.
    /// May reference ids missing from the catalog.
    #[serde(default)]
    pub alternatives: Vec<ProductId>,
}

impl Product {
    /// Returns the footprint tier of this product.
    #[inline]
    pub fn footprint_tier(&self) -> FootprintTier {
        FootprintTier::classify(self.carbon_footprint)
    }

    /// Checks whether the product lists any alternatives (resolvable or not).
    #[inline]
    pub fn has_alternatives(&self) -> bool {
        !self.alternatives.is_empty()
    }

    /// Checks whether `id` is one of this product's listed alternatives.
    pub fn lists_alternative(&self, id: ProductId) -> bool {
        self.alternatives.contains(&id)
    }
}

// =============================================================================
// Line Key
// =============================================================================

/// Identity of a cart line: the base product plus the chosen alternative.
///
/// Two cart entries are the same line only if both parts match, so a
/// product can sit in the cart once plain and once "upgraded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub alternative_id: Option<ProductId>,
}

impl LineKey {
    pub fn new(product: &Product, alternative: Option<&Product>) -> Self {
        LineKey {
            product_id: product.id,
            alternative_id: alternative.map(|alt| alt.id),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alternative_id {
            Some(alt) => write!(f, "{}-{}", self.product_id, alt),
            None => write!(f, "{}-original", self.product_id),
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// ## Snapshot Pattern
/// The line holds full copies of the products rather than ids, so a restored
/// cart renders and totals correctly even if the catalog it came from has
/// since changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// The base product the shopper picked.
    pub product: Product,

    /// Units on this line. Always ≥ 1 while the line is in a cart.
    #[ts(type = "number")]
    pub quantity: i64,

    /// The greener substitute bought in place of `product`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub selected_alternative: Option<Product>,
}

impl CartItem {
    /// Creates a single-unit line.
    pub fn new(product: &Product, alternative: Option<&Product>) -> Self {
        CartItem {
            product: product.clone(),
            quantity: 1,
            selected_alternative: alternative.cloned(),
        }
    }

    /// Returns the identity key of this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.product, self.selected_alternative.as_ref())
    }

    /// The product actually being bought: the alternative if one was chosen.
    #[inline]
    pub fn display_product(&self) -> &Product {
        self.selected_alternative.as_ref().unwrap_or(&self.product)
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.display_product().price
    }

    #[inline]
    pub fn unit_footprint(&self) -> f64 {
        self.display_product().carbon_footprint
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }

    /// Unit footprint × quantity.
    pub fn line_footprint(&self) -> f64 {
        self.unit_footprint() * self.quantity as f64
    }

    /// Footprint avoided by buying the alternative, × quantity.
    ///
    /// Zero without an alternative. Negative if the "alternative" is dirtier
    /// than the base product; no clamping.
    pub fn line_savings(&self) -> f64 {
        match &self.selected_alternative {
            Some(alt) => {
                (self.product.carbon_footprint - alt.carbon_footprint) * self.quantity as f64
            }
            None => 0.0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
