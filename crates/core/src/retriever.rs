/// Best-matching chunk for a question vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Retrieval {
    pub index: usize,
    pub score: f32,
}

/// Scores every chunk vector against the question vector by dot product and
/// returns the argmax; ties resolve to the lowest index. The embedder emits
/// unit-norm vectors, so the dot product here is exactly cosine similarity.
/// Returns `None` on an empty matrix; the caller must treat that as a
/// configuration error, not feed it into answer extraction.
pub fn retrieve(question: &[f32], chunk_vectors: &[Vec<f32>]) -> Option<Retrieval> {
    let mut best: Option<Retrieval> = None;

    for (index, vector) in chunk_vectors.iter().enumerate() {
        let score = dot(question, vector);
        let improves = best.map(|current| score > current.score).unwrap_or(true);
        if improves {
            best = Some(Retrieval { index, score });
        }
    }

    best
}

fn dot(left: &[f32], right: &[f32]) -> f32 {
    left.iter().zip(right).map(|(a, b)| a * b).sum()
}
