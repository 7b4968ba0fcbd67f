//! Application-level configuration.
//!
//! - [`GenerationParams`] - models, audience level and illustration fan-out

pub mod generation_params;

pub use generation_params::GenerationParams;
