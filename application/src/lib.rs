//! Application layer for comic-tutor
//!
//! This crate contains use cases, port definitions, the Generation Client
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod generation;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use generation::{FailureCause, GenerationClient, GenerationError};
pub use ports::{
    generation_gateway::{GatewayError, GenerationGateway, ResponsePart},
    progress::{ComicEventSink, NoEvents, NoObserver, SessionObserver},
};
pub use use_cases::assemble_comic::{
    AssembleComicError, AssembleComicInput, AssembleComicUseCase, AssembledComic,
};
pub use use_cases::comic_session::ComicSession;
