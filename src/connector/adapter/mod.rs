mod atlas_vector_repository;
mod chat_client;
mod gemini_caption;
mod gemini_client;
mod gemini_embedding;
mod in_memory_vector_repository;
mod llm_negation_classifier;
mod mock_embedding;
mod rule_based_negation_classifier;

pub use atlas_vector_repository::*;
pub use chat_client::*;
pub use gemini_caption::*;
pub use gemini_client::*;
pub use gemini_embedding::*;
pub use in_memory_vector_repository::*;
pub use llm_negation_classifier::*;
pub use mock_embedding::*;
pub use rule_based_negation_classifier::*;
