//! Prompt templates for the capture-and-answer flow

pub mod template;

pub use template::PromptTemplate;
