use crate::error::IngestError;

pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 128;

// Chunks and questions must go through the same model; vectors from
// different models live in different spaces.
pub const DEFAULT_EMBEDDING_MODEL: &str = "char-ngram-v1";

pub trait Embedder {
    fn dimensions(&self) -> usize;

    fn embed(&self, text: &str) -> Vec<f32>;

    fn embed_batch(&self, texts: &[String]) -> Vec<Vec<f32>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

/// An unknown identifier is a fatal startup error: no retrieval is possible
/// without a working model.
pub fn load_embedder(model: &str) -> Result<Box<dyn Embedder>, IngestError> {
    match model {
        DEFAULT_EMBEDDING_MODEL => Ok(Box::new(CharNgramEmbedder::default())),
        other => Err(IngestError::UnknownModel(other.to_string())),
    }
}

/// Hashed character-trigram embedder. Output vectors are unit norm, so a
/// plain dot product between two of them equals their cosine similarity.
#[derive(Debug, Clone, Copy)]
pub struct CharNgramEmbedder {
    pub dimensions: usize,
}

impl Default for CharNgramEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}

impl Embedder for CharNgramEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0f32; self.dimensions.max(1)];
        let lowered = text.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();

        for window in chars.windows(3) {
            let bucket = (fnv1a(window) % vector.len() as u64) as usize;
            vector[bucket] += 1.0;
        }

        let magnitude = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }

        vector
    }
}

fn fnv1a(chars: &[char]) -> u64 {
    let mut hash = 0xcbf29ce484222325u64;
    for ch in chars {
        let mut buffer = [0u8; 4];
        for byte in ch.encode_utf8(&mut buffer).bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
    }
    hash
}
