use crate::answer::{best_sentence, highlight_terms};
use crate::embeddings::{load_embedder, Embedder};
use crate::error::{IngestError, QueryError, OUT_OF_SCOPE_MESSAGE};
use crate::index::EmbeddingIndex;
use crate::ingest::{load_corpus, SkippedPdf};
use crate::models::{Answer, Chunk, EngineOptions};
use crate::retriever::retrieve;
use std::path::Path;

/// The long-lived query handle: chunk sequence, embedding matrix and the
/// shared embedding model, built once at startup and read-only afterwards.
pub struct TutorEngine {
    index: EmbeddingIndex,
    embedder: Box<dyn Embedder>,
    options: EngineOptions,
}

/// The built engine plus what the caller should surface in diagnostics
/// before answering questions.
pub struct BuildReport {
    pub engine: TutorEngine,
    pub document_count: usize,
    pub skipped: Vec<SkippedPdf>,
    pub empty_documents: Vec<String>,
}

impl TutorEngine {
    /// Loads and indexes every PDF under `folder`. Fatal errors: an empty
    /// folder and an unknown embedding model.
    pub fn build(folder: &Path, options: EngineOptions) -> Result<BuildReport, IngestError> {
        let report = load_corpus(folder, &options)?;
        let engine = Self::from_chunks(report.chunks, options)?;

        Ok(BuildReport {
            engine,
            document_count: report.documents.len(),
            skipped: report.skipped,
            empty_documents: report.empty_documents,
        })
    }

    pub fn from_chunks(chunks: Vec<Chunk>, options: EngineOptions) -> Result<Self, IngestError> {
        let embedder = load_embedder(&options.embedding_model)?;
        let index = EmbeddingIndex::build(chunks, embedder.as_ref());

        Ok(Self {
            index,
            embedder,
            options,
        })
    }

    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Answers one question independently of any history. Questions scoring
    /// below the similarity gate get an out-of-scope record with the fixed
    /// message and `"-"` provenance, never chunk content.
    pub fn ask(&self, question: &str) -> Result<Answer, QueryError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QueryError::EmptyQuestion);
        }

        let question_vector = self.embedder.embed(question);
        let best =
            retrieve(&question_vector, self.index.vectors()).ok_or(QueryError::EmptyIndex)?;

        if best.score < self.options.similarity_gate {
            return Ok(Answer {
                answer_text: OUT_OF_SCOPE_MESSAGE.to_string(),
                source_document: "-".to_string(),
                section_label: "-".to_string(),
                similarity: best.score,
                in_scope: false,
            });
        }

        let chunk = self.index.chunk(best.index);
        let sentence = best_sentence(&chunk.body, question);
        let answer_text = highlight_terms(&sentence, question)?;

        Ok(Answer {
            answer_text,
            source_document: strip_pdf_extension(&chunk.source_document),
            section_label: clip_label(&chunk.title, self.options.section_display_chars),
            similarity: best.score,
            in_scope: true,
        })
    }
}

fn strip_pdf_extension(document: &str) -> String {
    Path::new(document)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| document.to_string())
}

fn clip_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let clipped: String = label.chars().take(max_chars).collect();
        format!("{clipped}...")
    } else {
        label.to_string()
    }
}
