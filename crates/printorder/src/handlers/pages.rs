use askama::Template;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use printorder_core::pricing::{delivery_multiplier, DeliveryTier, PricingScheme};
use serde::Deserialize;

use super::HtmlTemplate;
use crate::state::AppState;

/// Page count the form starts with.
pub const DEFAULT_PAGES: u32 = 50;

/// One row of the public price list.
struct RateRow {
    range: &'static str,
    rate: &'static str,
}

fn rate_rows(scheme: PricingScheme) -> Vec<RateRow> {
    match scheme {
        PricingScheme::PerPage => vec![
            RateRow {
                range: "1 - 100 pages",
                rate: "₹2 per page",
            },
            RateRow {
                range: "101 - 999 pages",
                rate: "₹1.5 per page",
            },
            RateRow {
                range: "1000 pages and more",
                rate: "₹1 per page",
            },
        ],
        PricingScheme::FlatTier => vec![
            RateRow {
                range: "Up to 50 pages",
                rate: "₹100",
            },
            RateRow {
                range: "51 - 100 pages",
                rate: "₹150",
            },
            RateRow {
                range: "Above 100 pages",
                rate: "₹150 plus ₹50 per extra 50 pages",
            },
        ],
    }
}

/// Delivery choice as rendered in the form and price list.
struct TierOption {
    value: &'static str,
    label: &'static str,
    surcharge: String,
    selected: bool,
}

fn tier_options(selected: DeliveryTier) -> Vec<TierOption> {
    DeliveryTier::ALL
        .into_iter()
        .map(|tier| TierOption {
            value: tier.as_str(),
            label: tier.label(),
            surcharge: format!("+{}%", ((delivery_multiplier(tier) - 1.0) * 100.0).round()),
            selected: tier == selected,
        })
        .collect()
}

/// Landing page template with the price list.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    rates: Vec<RateRow>,
    tiers: Vec<TierOption>,
    starting_pages: u32,
    starting_price: u64,
}

/// Handler for the landing page (GET /).
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let scheme = state.config.pricing_scheme;

    HtmlTemplate(IndexTemplate {
        rates: rate_rows(scheme),
        tiers: tier_options(DeliveryTier::Standard),
        starting_pages: DEFAULT_PAGES,
        starting_price: scheme.price(DEFAULT_PAGES, DeliveryTier::Standard),
    })
}

/// Optional seed values for the order form.
#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    pub pages: Option<String>,
    pub delivery: Option<String>,
}

/// Order form template.
#[derive(Template)]
#[template(path = "form.html")]
struct FormTemplate {
    pages: u32,
    price: u64,
    tiers: Vec<TierOption>,
    scheme: &'static str,
    accept: String,
    allowed_types: String,
    max_upload_mb: u64,
}

/// Handler for the order form (GET /form).
///
/// The displayed price is indicative; `POST /send` recomputes it.
pub async fn order_form(
    State(state): State<AppState>,
    Query(query): Query<FormQuery>,
) -> impl IntoResponse {
    let scheme = state.config.pricing_scheme;
    let rules = state.config.upload_rules();

    let pages = query
        .pages
        .as_deref()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PAGES);
    let delivery = query
        .delivery
        .as_deref()
        .map(DeliveryTier::from_form_value)
        .unwrap_or_default();

    HtmlTemplate(FormTemplate {
        pages,
        price: scheme.price(pages, delivery),
        tiers: tier_options(delivery),
        scheme: scheme.as_str(),
        accept: rules
            .document_types
            .iter()
            .map(|t| t.mime)
            .collect::<Vec<_>>()
            .join(","),
        allowed_types: rules.allowed_document_labels(),
        max_upload_mb: rules.limit_mb(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_options_mark_selection() {
        let options = tier_options(DeliveryTier::Instant);

        assert_eq!(options.len(), 3);
        assert!(options.iter().filter(|o| o.selected).count() == 1);
        assert!(options[2].selected);
        assert_eq!(options[0].surcharge, "+0%");
        assert_eq!(options[1].surcharge, "+20%");
        assert_eq!(options[2].surcharge, "+50%");
    }

    #[test]
    fn test_rate_rows_follow_scheme() {
        assert_eq!(rate_rows(PricingScheme::PerPage)[0].rate, "₹2 per page");
        assert_eq!(rate_rows(PricingScheme::FlatTier)[0].rate, "₹100");
    }
}
