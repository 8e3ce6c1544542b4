mod image_search_controller;
mod ingest_controller;
mod search_controller;
mod stats_controller;

pub use image_search_controller::*;
pub use ingest_controller::*;
pub use search_controller::*;
pub use stats_controller::*;
