use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFingerprint {
    pub document_title: String,
    pub source_path: String,
    pub checksum: String,
    pub ingested_at: DateTime<Utc>,
}

/// The unit of retrieval; chunk identity is its position in the global
/// ordered sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub body: String,
    pub title: String,
    pub source_document: String,
    pub kind: ChunkKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChunkKind {
    Section,
    Paragraph,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub answer_text: String,
    pub source_document: String,
    pub section_label: String,
    pub similarity: f32,
    pub in_scope: bool,
}

/// One exchange in the session history, owned by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: Answer,
    pub asked_at: DateTime<Utc>,
}

/// When the paragraph fallback may fire for a document that produced no
/// section chunks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FallbackTrigger {
    /// Fall back whenever the current document contributed no section chunks.
    PerDocument,
    /// Fall back only while the global chunk sequence is still empty, so only
    /// the first loaded document can ever trigger it. Replicates the legacy
    /// behavior; kept for compatibility, not recommended.
    FirstDocumentOnly,
}

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub embedding_model: String,
    pub min_section_chunk_chars: usize,
    pub min_paragraph_chunk_chars: usize,
    pub title_seed_chars: usize,
    pub section_display_chars: usize,
    pub similarity_gate: f32,
    pub max_pages_per_pdf: usize,
    pub fallback_trigger: FallbackTrigger,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            embedding_model: "char-ngram-v1".to_string(),
            min_section_chunk_chars: 60,
            min_paragraph_chunk_chars: 40,
            title_seed_chars: 35,
            section_display_chars: 45,
            similarity_gate: 0.65,
            max_pages_per_pdf: 50,
            fallback_trigger: FallbackTrigger::PerDocument,
        }
    }
}
