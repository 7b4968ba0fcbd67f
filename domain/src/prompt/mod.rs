//! Prompt and schema templates for the generation calls

pub mod schema;
pub mod template;

pub use schema::ComicSchemas;
pub use template::ComicPromptTemplate;
