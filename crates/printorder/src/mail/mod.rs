//! Outbound email.
//!
//! A thin abstraction over [lettre](https://lettre.rs): handlers build an
//! [`Email`] and hand it to a [`Mailer`]. [`SmtpMailer`] is the production
//! transport; tests swap in recording or failing mailers.

mod mailer;
mod message;
mod notifier;
#[cfg(test)]
pub mod testing;

pub use mailer::{Mailer, SmtpMailer};
pub use message::{Attachment, Email, EmailBody};
pub use notifier::notify_order;
