//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod assemble_comic;
pub mod comic_session;
