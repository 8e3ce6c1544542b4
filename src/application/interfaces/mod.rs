mod caption_service;
mod embedding_service;
mod negation_classifier;
mod vector_repository;

pub use caption_service::*;
pub use embedding_service::*;
pub use negation_classifier::*;
pub use vector_repository::*;
