pub mod features;
pub mod lexicon;
pub mod transcription;

// Re-export the main types for convenience
pub use features::{extract, FeatureVector};
pub use lexicon::Lexicon;
pub use transcription::{transcribe, Transcription};
