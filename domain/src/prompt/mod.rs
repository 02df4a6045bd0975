//! Channel message templates

pub mod template;

pub use template::PromptTemplate;
