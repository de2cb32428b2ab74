//! Order submission (`POST /send`).
//!
//! Validating -> (Notifying | Rejected) -> (Confirmed | Failed). Rejected and
//! Failed are rendered by [`OrderError`]; Confirmed renders the summary page.

use askama::Template;
use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    response::{IntoResponse, Response},
};
use printorder_core::{
    order::{parse_order, quote_order, OrderFields, OrderSubmission, PriceQuote, ValidationError},
    upload::{FileSlot, UploadCollector, UploadRules, UploadedFile},
};

use super::{HtmlTemplate, OrderError};
use crate::{mail::notify_order, state::AppState};

/// Confirmation page echoing the order.
#[derive(Template)]
#[template(path = "confirmation.html")]
struct ConfirmationTemplate {
    order: OrderSubmission,
    quote: PriceQuote,
}

/// Handler for order submissions (POST /send).
pub async fn send_order(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, OrderError> {
    let multipart =
        multipart.map_err(|rejection| ValidationError::Malformed(rejection.body_text()))?;

    let order = match read_submission(multipart, &state.config.upload_rules()).await {
        Ok(order) => order,
        Err(error) => {
            tracing::warn!(error = %error, "Rejected order submission");
            return Err(error.into());
        }
    };

    let quote = quote_order(&order, state.config.pricing_scheme);
    if let Some(quoted) = quote.mismatch() {
        tracing::warn!(
            reference = %order.reference,
            computed = quote.computed,
            quoted,
            "Client-supplied price differs from computed price"
        );
    }

    tracing::info!(
        reference = %order.reference,
        pages = order.page_count,
        delivery = %order.delivery,
        ai_check = order.ai_check,
        price = quote.computed,
        "Order accepted, sending notification"
    );

    notify_order(state.mailer.as_ref(), &state.config, &order, &quote).await?;

    Ok(HtmlTemplate(ConfirmationTemplate { order, quote }).into_response())
}

/// Reads every multipart field, then validates files before text fields.
async fn read_submission(
    mut multipart: Multipart,
    rules: &UploadRules,
) -> Result<OrderSubmission, ValidationError> {
    let mut fields = OrderFields::default();
    let mut uploads = UploadCollector::new();

    while let Some(mut field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = read_file(&mut field, &name, rules).await?;
                uploads.accept(&name, UploadedFile::new(file_name, content_type, bytes))?;
            }
            None => {
                let value = field.text().await.map_err(malformed)?;
                if !fields.set(&name, value) {
                    tracing::debug!(field = %name, "Ignoring unknown form field");
                }
            }
        }
    }

    let uploads = uploads.finish(rules)?;
    parse_order(fields, uploads)
}

/// Buffers a file part, failing as soon as it grows past the size limit.
async fn read_file(
    field: &mut Field<'_>,
    name: &str,
    rules: &UploadRules,
) -> Result<Vec<u8>, ValidationError> {
    let slot = FileSlot::from_field_name(name)
        .ok_or_else(|| ValidationError::UnexpectedFile(name.to_string()))?;

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(malformed)? {
        rules.check_size(slot, (bytes.len() + chunk.len()) as u64)?;
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

fn malformed(err: MultipartError) -> ValidationError {
    ValidationError::Malformed(err.body_text())
}
