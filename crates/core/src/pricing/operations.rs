//! Price calculation.
//!
//! Arithmetic is done in `f64` in the same order as the published price list
//! (`pages * rate`, then `* multiplier`, then round) so quotes match the
//! figures customers see on the form to the unit.

use super::types::DeliveryTier;

/// Per-page rate for the given page count.
///
/// - up to 100 pages: 2
/// - 101 to 500 pages: 1.5
/// - 1000 pages and above: 1
///
/// 501..=999 has no band of its own and stays at 1.5.
pub fn per_page_rate(pages: u32) -> f64 {
    if pages >= 1000 {
        1.0
    } else if pages > 100 {
        1.5
    } else {
        2.0
    }
}

/// Price multiplier for a delivery tier.
pub fn delivery_multiplier(tier: DeliveryTier) -> f64 {
    match tier {
        DeliveryTier::Instant => 1.5,
        DeliveryTier::OneDay => 1.2,
        DeliveryTier::Standard => 1.0,
    }
}

/// Unrounded price before the delivery multiplier.
pub fn base_price(pages: u32) -> f64 {
    f64::from(pages) * per_page_rate(pages)
}

/// Quotes an order under the per-page rule set.
///
/// # Examples
///
/// ```
/// use printorder_core::pricing::{calculate_price, DeliveryTier};
///
/// // 120 pages at 1.5 = 180, times 1.2 for next-day delivery.
/// assert_eq!(calculate_price(120, DeliveryTier::OneDay), 216);
/// ```
pub fn calculate_price(pages: u32, tier: DeliveryTier) -> u64 {
    round_price(base_price(pages) * delivery_multiplier(tier))
}

/// Base price under the flat-tier rule set of the first release.
pub fn flat_tier_base_price(pages: u32) -> f64 {
    if pages <= 50 {
        100.0
    } else if pages <= 100 {
        150.0
    } else {
        let extra_blocks = (pages - 100).div_ceil(50);
        150.0 + f64::from(extra_blocks) * 50.0
    }
}

/// Quotes an order under the flat-tier rule set of the first release.
pub fn flat_tier_price(pages: u32, tier: DeliveryTier) -> u64 {
    round_price(flat_tier_base_price(pages) * delivery_multiplier(tier))
}

fn round_price(amount: f64) -> u64 {
    // Inputs are non-negative, so round() is round-half-up here.
    amount.round() as u64
}
