pub mod pipeline;
pub mod segmenter;

pub use pipeline::{ingest, IngestOutcome, IngestionPipeline};
pub use segmenter::{split_sentences, Sentences};
