//! Gemini Content Generator for Arise
//!
//! This crate implements the `ContentGenerator` port on top of Google's
//! Gemini `generateContent` endpoint, using structured JSON output for
//! quests, tips and drills.
//!
//! # Usage
//!
//! ```rust,ignore
//! use arise_gemini::{GeminiConfig, GeminiContentGenerator};
//!
//! let config = GeminiConfig::new("your-api-key").with_model("gemini-2.0-flash");
//! let generator = GeminiContentGenerator::new(config);
//! ```

mod config;
mod generator;
mod schema;

pub use config::GeminiConfig;
pub use generator::GeminiContentGenerator;
pub use schema::response_schema;
