mod error;
mod http_mapping;
mod operations;
mod types;

pub use error::{DeliveryError, SubmissionError, ValidationError};
pub use http_mapping::submission_error_to_status_code;
pub use operations::{parse_checkbox, parse_order, parse_quoted_price, quote_order};
pub use types::{OrderFields, OrderSubmission, PriceQuote};
