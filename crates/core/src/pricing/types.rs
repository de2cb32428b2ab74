use std::{fmt, str::FromStr};

use thiserror::Error;

use super::operations::{calculate_price, flat_tier_price};

/// Turnaround speed selected on the order form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeliveryTier {
    #[default]
    Standard,
    OneDay,
    Instant,
}

impl DeliveryTier {
    /// All tiers, in the order the form lists them.
    pub const ALL: [DeliveryTier; 3] = [
        DeliveryTier::Standard,
        DeliveryTier::OneDay,
        DeliveryTier::Instant,
    ];

    /// Parses a submitted form value.
    ///
    /// Unknown or empty values fall back to [`DeliveryTier::Standard`], which
    /// is the pricing rule's "otherwise" branch. `oneday` and `immediate` are
    /// the values posted by the first version of the form.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "1-day" | "oneday" => DeliveryTier::OneDay,
            "instant" | "immediate" => DeliveryTier::Instant,
            _ => DeliveryTier::Standard,
        }
    }

    /// Value used in form fields and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryTier::Standard => "standard",
            DeliveryTier::OneDay => "1-day",
            DeliveryTier::Instant => "instant",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryTier::Standard => "Standard",
            DeliveryTier::OneDay => "1-Day",
            DeliveryTier::Instant => "Instant",
        }
    }

    /// Background color of the tier badge in the notification email.
    pub fn badge_color(&self) -> &'static str {
        match self {
            DeliveryTier::Standard => "#6c757d",
            DeliveryTier::OneDay => "#fd7e14",
            DeliveryTier::Instant => "#dc3545",
        }
    }
}

impl fmt::Display for DeliveryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing rule set used to quote an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PricingScheme {
    /// Per-page rate with volume bands. Current rule set.
    #[default]
    PerPage,
    /// Flat price tiers from the first release of the form.
    FlatTier,
}

impl PricingScheme {
    /// Quotes `pages` at `tier` under this scheme.
    pub fn price(&self, pages: u32, tier: DeliveryTier) -> u64 {
        match self {
            PricingScheme::PerPage => calculate_price(pages, tier),
            PricingScheme::FlatTier => flat_tier_price(pages, tier),
        }
    }

    /// Name accepted by `PRICING_SCHEME` and shown on quotes.
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingScheme::PerPage => "per-page",
            PricingScheme::FlatTier => "flat-tier",
        }
    }
}

impl fmt::Display for PricingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown pricing scheme: {0} (expected 'per-page' or 'flat-tier')")]
pub struct ParsePricingSchemeError(pub String);

impl FromStr for PricingScheme {
    type Err = ParsePricingSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-page" | "per_page" | "perpage" => Ok(PricingScheme::PerPage),
            "flat-tier" | "flat_tier" | "flattier" | "legacy" => Ok(PricingScheme::FlatTier),
            other => Err(ParsePricingSchemeError(other.to_string())),
        }
    }
}
