// Input ingestion — schema resolution and CSV reading.

pub mod reader;
pub mod schema;

pub use reader::{read_documents, IngestReport};
pub use schema::{resolve_text_columns, TextSchema};
