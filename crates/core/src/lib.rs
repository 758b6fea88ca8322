//! Domain logic for the atelier contact-submission service.
//!
//! This crate has no internal dependencies so it can be used by the
//! persistence layer, the API server, and the admin client alike.

pub mod error;
pub mod i18n;
pub mod submission;
pub mod triage;
pub mod types;
