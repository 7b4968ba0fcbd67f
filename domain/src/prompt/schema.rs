//! Response schemas declared to the text model
//!
//! Field names match the serde shapes of [`crate::Expert`] and
//! [`crate::ComicDocument`].

use serde_json::{Value, json};

/// JSON schemas for the structured text calls
pub struct ComicSchemas;

impl ComicSchemas {
    pub fn expert() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "The full name of the identified expert."
                },
                "description": {
                    "type": "STRING",
                    "description": "A brief, one-sentence visual description of the expert for an illustrator (e.g., 'Albert Einstein with his iconic wild white hair and mustache')."
                }
            },
            "required": ["name", "description"]
        })
    }

    pub fn story() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "A catchy, comic-book style title for the story."
                },
                "panels": {
                    "type": "ARRAY",
                    "description": "An array of exactly 4 comic panels.",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "scene": {
                                "type": "INTEGER",
                                "description": "The panel number, starting from 1."
                            },
                            "description": {
                                "type": "STRING",
                                "description": "A detailed visual description of the scene for an illustrator. Focus on a single key moment. Do not include any text or speech bubbles in the description."
                            },
                            "narration": {
                                "type": "STRING",
                                "description": "The narration or text that will appear in this panel. Keep it concise."
                            }
                        },
                        "required": ["scene", "description", "narration"]
                    }
                },
                "summary": {
                    "type": "STRING",
                    "description": "A brief, one-paragraph summary of the key concepts explained in the comic."
                }
            },
            "required": ["title", "panels", "summary"]
        })
    }
}
