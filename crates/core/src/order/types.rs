use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::pricing::{DeliveryTier, PricingScheme};
use crate::upload::UploadedFile;

/// Raw text fields of the order form, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFields {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub pages: Option<String>,
    pub delivery: Option<String>,
    pub price: Option<String>,
    pub ai_check: Option<String>,
}

impl OrderFields {
    /// Stores a form field by its multipart name.
    ///
    /// Returns `false` for names the form does not define; those are ignored.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "fullname" => &mut self.full_name,
            "phone" => &mut self.phone,
            "email" => &mut self.email,
            "pages" => &mut self.pages,
            "delivery" => &mut self.delivery,
            "price" => &mut self.price,
            "aiCheck" => &mut self.ai_check,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// A validated order, alive for the duration of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    /// Correlates log lines and the notification email for this request.
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub page_count: u32,
    pub delivery: DeliveryTier,
    pub ai_check: bool,
    /// Price the browser displayed when the form was sent. Not trusted.
    pub quoted_price: Option<u64>,
    pub document: UploadedFile,
    pub payment: UploadedFile,
}

impl OrderSubmission {
    /// First eight hex digits of the reference.
    pub fn short_reference(&self) -> String {
        self.reference.simple().to_string()[..8].to_string()
    }
}

/// Server-side price of an order next to the price the client showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub scheme: PricingScheme,
    pub computed: u64,
    pub quoted: Option<u64>,
}

impl PriceQuote {
    /// The client-supplied price when it disagrees with the computed one.
    pub fn mismatch(&self) -> Option<u64> {
        self.quoted.filter(|quoted| *quoted != self.computed)
    }

    pub fn is_consistent(&self) -> bool {
        self.mismatch().is_none()
    }
}
