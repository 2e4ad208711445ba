//! Extractive summarization without external models.

pub mod models;
pub mod stopwords;
pub mod text;

pub use models::create_model;
