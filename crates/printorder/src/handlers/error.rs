use askama::Template;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use printorder_core::order::{
    submission_error_to_status_code, DeliveryError, SubmissionError, ValidationError,
};

use super::HtmlTemplate;

/// Error page for a rejected or failed submission.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    title: &'static str,
    message: String,
    retry_label: &'static str,
}

/// A `POST /send` that ended in `Rejected` or `Failed`.
///
/// Renders the error page with the status from
/// [`submission_error_to_status_code`].
#[derive(Debug)]
pub struct OrderError(pub SubmissionError);

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(submission_error_to_status_code(&self.0))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let (title, retry_label) = match &self.0 {
            SubmissionError::Rejected(_) => ("Please check your order", "Back to the form"),
            SubmissionError::Failed(_) => ("We could not send your order", "Try again"),
        };

        let page = ErrorTemplate {
            title,
            message: self.0.to_string(),
            retry_label,
        };

        (status, HtmlTemplate(page)).into_response()
    }
}

impl From<SubmissionError> for OrderError {
    fn from(err: SubmissionError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<DeliveryError> for OrderError {
    fn from(err: DeliveryError) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use printorder_core::upload::FileSlot;

    async fn render(error: OrderError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_renders_400() {
        let (status, html) =
            render(ValidationError::MissingFile(FileSlot::Document).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(html.contains("Missing required file: document"));
        assert!(html.contains("href=\"/form\""));
    }

    #[tokio::test]
    async fn test_delivery_error_renders_500() {
        let (status, html) =
            render(DeliveryError::Transport("454 TLS not available".to_string()).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(html.contains("Mail transport error: 454 TLS not available"));
        assert!(html.contains("Try again"));
    }
}
