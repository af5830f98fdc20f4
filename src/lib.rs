pub mod document_extractor;
pub mod models;
pub mod processing;
pub mod utils;

pub use document_extractor::DocumentExtractor;
pub use models::{DocumentType, ExtractionResult, OcrLine};
pub use utils::{ExtractionError, ExtractorConfig};
