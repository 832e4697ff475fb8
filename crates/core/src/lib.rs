pub mod answer;
pub mod chunking;
pub mod embeddings;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod index;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod retriever;

pub use answer::{best_sentence, highlight_terms, split_sentences};
pub use chunking::Segmenter;
pub use embeddings::{
    load_embedder, CharNgramEmbedder, Embedder, DEFAULT_EMBEDDING_DIMENSIONS,
    DEFAULT_EMBEDDING_MODEL,
};
pub use engine::{BuildReport, TutorEngine};
pub use error::{IngestError, QueryError, OUT_OF_SCOPE_MESSAGE};
pub use extractor::{LopdfExtractor, PageText, PdfExtractor};
pub use index::EmbeddingIndex;
pub use ingest::{discover_pdf_files, load_corpus, segment_corpus, CorpusReport, SkippedPdf};
pub use models::{
    Answer, ChatTurn, Chunk, ChunkKind, DocumentFingerprint, EngineOptions, FallbackTrigger,
};
pub use normalize::TextNormalizer;
pub use retriever::{retrieve, Retrieval};
