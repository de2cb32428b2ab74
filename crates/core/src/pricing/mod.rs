mod operations;
mod types;

pub use operations::{
    base_price, calculate_price, delivery_multiplier, flat_tier_base_price, flat_tier_price,
    per_page_rate,
};
pub use types::{DeliveryTier, ParsePricingSchemeError, PricingScheme};
