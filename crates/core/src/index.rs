use crate::embeddings::Embedder;
use crate::models::Chunk;

/// The global ordered chunk sequence and its parallel embedding matrix
/// (row `i` embeds chunk `i`). Built once, immutable afterwards.
pub struct EmbeddingIndex {
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
}

impl EmbeddingIndex {
    pub fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Self {
        let vectors = chunks
            .iter()
            .map(|chunk| embedder.embed(&chunk.body))
            .collect();
        Self { chunks, vectors }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunk(&self, index: usize) -> &Chunk {
        &self.chunks[index]
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }
}

#[cfg(test)]
mod tests {
    use super::EmbeddingIndex;
    use crate::embeddings::{CharNgramEmbedder, Embedder};
    use crate::models::{Chunk, ChunkKind};

    fn chunk(body: &str) -> Chunk {
        Chunk {
            body: body.to_string(),
            title: body.chars().take(35).collect(),
            source_document: "doc.pdf".to_string(),
            kind: ChunkKind::Section,
        }
    }

    #[test]
    fn index_rows_align_with_chunks() {
        let embedder = CharNgramEmbedder::default();
        let chunks = vec![chunk("primer cuerpo"), chunk("segundo cuerpo")];
        let index = EmbeddingIndex::build(chunks, &embedder);

        assert_eq!(index.len(), 2);
        assert_eq!(index.vectors().len(), 2);
        assert_eq!(index.vectors()[0], embedder.embed(&index.chunk(0).body));
        assert_eq!(index.vectors()[1], embedder.embed(&index.chunk(1).body));
    }

    #[test]
    fn empty_corpus_builds_an_empty_index() {
        let index = EmbeddingIndex::build(Vec::new(), &CharNgramEmbedder::default());
        assert!(index.is_empty());
    }
}
