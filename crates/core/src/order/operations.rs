use chrono::Utc;
use uuid::Uuid;

use crate::pricing::{DeliveryTier, PricingScheme};
use crate::upload::ValidatedUploads;

use super::error::ValidationError;
use super::types::{OrderFields, OrderSubmission, PriceQuote};

/// Builds an [`OrderSubmission`] from the form fields and the validated files.
pub fn parse_order(
    fields: OrderFields,
    uploads: ValidatedUploads,
) -> Result<OrderSubmission, ValidationError> {
    let full_name = required("fullname", fields.full_name)?;
    let phone = required("phone", fields.phone)?;

    let email = required("email", fields.email)?;
    if !email.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidField {
            field: "email",
            value: email,
        });
    }

    let pages = required("pages", fields.pages)?;
    let page_count = pages
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidField {
            field: "pages",
            value: pages,
        })?;

    let delivery = fields
        .delivery
        .as_deref()
        .map(DeliveryTier::from_form_value)
        .unwrap_or_default();

    Ok(OrderSubmission {
        reference: Uuid::new_v4(),
        submitted_at: Utc::now(),
        full_name,
        phone,
        email,
        page_count,
        delivery,
        ai_check: fields.ai_check.as_deref().is_some_and(parse_checkbox),
        quoted_price: fields.price.as_deref().and_then(parse_quoted_price),
        document: uploads.document,
        payment: uploads.payment,
    })
}

/// Prices a submission server-side, keeping the client's figure alongside.
pub fn quote_order(order: &OrderSubmission, scheme: PricingScheme) -> PriceQuote {
    PriceQuote {
        scheme,
        computed: scheme.price(order.page_count, order.delivery),
        quoted: order.quoted_price,
    }
}

/// Interprets a checkbox value. Browsers send `on` for a checked box.
pub fn parse_checkbox(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "yes" | "1"
    )
}

/// Parses the client-supplied price (`216`, `216.00`, `₹216`).
///
/// Anything unreadable is dropped; the server price is authoritative.
pub fn parse_quoted_price(value: &str) -> Option<u64> {
    let value = value.trim().trim_start_matches('₹').trim();
    if let Ok(price) = value.parse::<u64>() {
        return Some(price);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
        .map(|price| price.round() as u64)
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}
