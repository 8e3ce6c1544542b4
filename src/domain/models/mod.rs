mod embedding;
mod negation;
mod product;
mod search_result;

pub use embedding::*;
pub use negation::*;
pub use product::*;
pub use search_result::*;
