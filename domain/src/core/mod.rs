//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - generative models (text and image)
//! - [`question::Question`] - a validated, non-blank question
//! - [`audience::AudienceLevel`] - tone target for generated content
//! - [`error::DomainError`] - domain-level errors

pub mod audience;
pub mod error;
pub mod model;
pub mod question;
