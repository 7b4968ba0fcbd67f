//! Comic subdomain.
//!
//! - [`entities::Expert`] - the guide persona
//! - [`entities::ComicPanel`] / [`entities::ComicDocument`] - the comic itself
//! - [`image::ImageDataUri`] - a panel illustration as a data URI
//! - [`catalog`] - quick-start questions and loading captions

pub mod catalog;
pub mod entities;
pub mod image;
