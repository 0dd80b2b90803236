//! Summary generation infrastructure

mod gemini;

pub use gemini::GeminiSummarizer;
