use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shopsearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use deterministic mock embeddings instead of the Gemini endpoint.
    #[arg(long, global = true)]
    pub mock_embeddings: bool,

    /// Use the in-memory vector store instead of Atlas.
    #[arg(long, global = true)]
    pub memory_storage: bool,

    /// Use the offline rule-based negation classifier instead of the LLM.
    #[arg(long, global = true)]
    pub rule_based_negation: bool,

    /// MongoDB connection string; defaults to the ATLAS_URI environment variable.
    #[arg(long, global = true)]
    pub mongo_uri: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog with a free-text query.
    Search {
        query: String,

        /// Advisory category id (e.g. 104 Suitcases, 110 Men's Clothing).
        #[arg(short, long)]
        category: Option<i32>,
    },

    /// Caption an image and search with the combined text.
    ImageSearch {
        /// Path to the image file.
        image: String,

        /// Text query to combine with the image caption.
        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(short, long)]
        category: Option<i32>,
    },

    /// Load a JSON product feed into the vector store.
    Ingest {
        path: String,

        /// Only ingest the first N records.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    Stats,
}
