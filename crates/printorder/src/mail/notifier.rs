//! Order notification email.

use askama::Template;
use printorder_core::order::{DeliveryError, OrderSubmission, PriceQuote};

use super::{Email, Mailer};
use crate::config::Config;

#[derive(Template)]
#[template(path = "email/order.txt")]
struct OrderEmailText<'a> {
    order: &'a OrderSubmission,
    quote: &'a PriceQuote,
}

#[derive(Template)]
#[template(path = "email/order.html")]
struct OrderEmailHtml<'a> {
    order: &'a OrderSubmission,
    quote: &'a PriceQuote,
}

/// Builds the notification for `order`, addressed to the configured recipient
/// with both uploaded files attached.
pub fn compose_order_email(
    config: &Config,
    order: &OrderSubmission,
    quote: &PriceQuote,
) -> Result<Email, DeliveryError> {
    let text = OrderEmailText { order, quote }
        .render()
        .map_err(|e| DeliveryError::Compose(e.to_string()))?;
    let html = OrderEmailHtml { order, quote }
        .render()
        .map_err(|e| DeliveryError::Compose(e.to_string()))?;

    Email::builder()
        .from(Some(config.sender_name.clone()), config.email_user.clone())
        .to(config.receiver_email.clone())
        .reply_to(order.email.clone())
        .subject(format!(
            "New Document Order from {} ({})",
            order.full_name,
            order.short_reference()
        ))
        .text(text)
        .html(html)
        .attach(
            order.document.file_name.clone(),
            order.document.content_type.clone(),
            order.document.bytes.clone(),
        )
        .attach(
            order.payment.file_name.clone(),
            order.payment.content_type.clone(),
            order.payment.bytes.clone(),
        )
        .build()
}

/// Composes and sends the notification for `order`. Sent at most once.
pub async fn notify_order(
    mailer: &dyn Mailer,
    config: &Config,
    order: &OrderSubmission,
    quote: &PriceQuote,
) -> Result<(), DeliveryError> {
    let email = compose_order_email(config, order, quote)?;

    if let Err(error) = mailer.send(&email).await {
        tracing::error!(
            reference = %order.reference,
            error = %error,
            "Failed to send order notification"
        );
        return Err(error);
    }

    tracing::info!(
        reference = %order.reference,
        recipient = %config.receiver_email,
        "Order notification sent"
    );
    Ok(())
}
