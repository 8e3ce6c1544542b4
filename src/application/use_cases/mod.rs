mod ingest_catalog;
mod search_by_image;
mod search_products;

pub use ingest_catalog::*;
pub use search_by_image::*;
pub use search_products::*;
