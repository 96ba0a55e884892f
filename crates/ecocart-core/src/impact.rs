//! # Impact Equivalents
//!
//! Turns kg CO₂e figures into everyday comparisons for display.
//!
//! These are presentation aids, not carbon accounting: the factors are fixed
//! rules of thumb.

/// Miles driven in an average car per kg CO₂e.
pub const MILES_PER_KG_CO2E: f64 = 2.3;

/// kg CO₂e attributed to one planted tree.
pub const KG_CO2E_PER_TREE: f64 = 10.0;

/// Car miles with the same footprint.
///
/// ```rust
/// use ecocart_core::impact::driving_miles;
///
/// assert!((driving_miles(10.0) - 23.0).abs() < 1e-9);
/// ```
pub fn driving_miles(kg_co2e: f64) -> f64 {
    kg_co2e * MILES_PER_KG_CO2E
}

/// Whole trees whose planting offsets the footprint. Never negative.
pub fn trees_equivalent(kg_co2e: f64) -> u32 {
    if !kg_co2e.is_finite() || kg_co2e <= 0.0 {
        return 0;
    }
    (kg_co2e / KG_CO2E_PER_TREE).floor() as u32
}

/// Percentage reduction from `base_kg` to `alternative_kg`.
///
/// Returns `None` when the base footprint is zero (or not a positive
/// number), where a percentage has no meaning.
pub fn reduction_percent(base_kg: f64, alternative_kg: f64) -> Option<f64> {
    if base_kg.is_nan() || base_kg <= 0.0 {
        return None;
    }
    Some((base_kg - alternative_kg) / base_kg * 100.0)
}
