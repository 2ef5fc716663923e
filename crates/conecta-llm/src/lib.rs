pub mod gemini;
pub mod generator;

pub mod mock;

pub use gemini::GeminiGenerator;
pub use generator::{ModelCapability, TextGenerator};
pub use mock::MockGenerator;
