pub mod error;
pub mod health;
mod html;
pub mod orders;
pub mod pages;

pub use error::OrderError;
pub(crate) use html::HtmlTemplate;
