//! Generation Client: typed wrappers over the three remote operations.

pub mod client;
pub mod error;

pub use client::GenerationClient;
pub use error::{FailureCause, GenerationError};
