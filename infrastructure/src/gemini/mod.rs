//! Gemini text generation adapters

mod fallback;
mod generator;

pub use fallback::FallbackTextGenerator;
pub use generator::{GeminiSettings, GeminiTextGenerator};
