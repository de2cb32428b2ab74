//! Functional core for printorder.
//!
//! Everything in this crate is pure: pricing rules, upload validation and the
//! order model. I/O (HTTP, multipart streaming, SMTP) lives in the
//! `printorder` binary crate.

pub mod order;
pub mod pricing;
pub mod upload;
