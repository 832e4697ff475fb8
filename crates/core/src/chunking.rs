use crate::error::IngestError;
use crate::models::{Chunk, ChunkKind, EngineOptions};
use regex::Regex;

/// Splits normalized document text into titled chunks at numbered
/// subsection headings (`1.2. Título` up to the end of its line) or
/// inverted-question spans (`¿ … ?`).
pub struct Segmenter {
    marker: Regex,
    min_section_chars: usize,
    min_paragraph_chars: usize,
    title_seed_chars: usize,
}

impl Segmenter {
    pub fn new(options: &EngineOptions) -> Result<Self, IngestError> {
        Ok(Self {
            marker: Regex::new(r"\d+\.\d+\.\s+.+\n|¿.+?\?")?,
            min_section_chars: options.min_section_chunk_chars,
            min_paragraph_chars: options.min_paragraph_chunk_chars,
            title_seed_chars: options.title_seed_chars,
        })
    }

    /// Text before the first marker has no title to attach to and is
    /// dropped; every emitted chunk body is longer than
    /// `min_section_chunk_chars`.
    pub fn segment_sections(&self, normalized: &str, document: &str) -> Vec<Chunk> {
        let spans: Vec<(usize, usize)> = self
            .marker
            .find_iter(normalized)
            .map(|found| (found.start(), found.end()))
            .collect();

        let mut chunks = Vec::new();

        for (position, (start, end)) in spans.iter().enumerate() {
            let title = normalized[*start..*end].trim();
            let body_end = spans
                .get(position + 1)
                .map(|(next_start, _)| *next_start)
                .unwrap_or(normalized.len());
            let content = normalized[*end..body_end].trim();

            let block = format!("{title}\n{content}");
            if block.chars().count() <= self.min_section_chars {
                continue;
            }

            let label = if title.is_empty() {
                head_chars(&block, self.title_seed_chars)
            } else {
                title.to_string()
            };

            chunks.push(Chunk {
                body: block,
                title: label,
                source_document: document.to_string(),
                kind: ChunkKind::Section,
            });
        }

        chunks
    }

    /// Fallback for documents where no section marker matched: blank-line
    /// paragraphs longer than `min_paragraph_chunk_chars`.
    pub fn segment_paragraphs(&self, normalized: &str, document: &str) -> Vec<Chunk> {
        normalized
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| paragraph.chars().count() > self.min_paragraph_chars)
            .map(|paragraph| Chunk {
                body: paragraph.to_string(),
                title: head_chars(paragraph, self.title_seed_chars),
                source_document: document.to_string(),
                kind: ChunkKind::Paragraph,
            })
            .collect()
    }
}

fn head_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}
