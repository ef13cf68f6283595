use crate::errors::SiftResult;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> SiftResult<Vec<f32>>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String]) -> SiftResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}

/// Embedding and similarity port used by stages and the hybrid executor.
///
/// Failures never propagate: an unusable embedding is an empty vector and
/// an unusable similarity is `0.0`.
pub trait IEmbeddingService: Send + Sync {
    fn generate_embedding(&self, text: &str) -> Vec<f32>;

    fn calculate_similarity(&self, a: &str, b: &str) -> f64 {
        let va = self.generate_embedding(a);
        if va.is_empty() {
            return 0.0;
        }
        let vb = self.generate_embedding(b);
        self.cosine_similarity(&va, &vb)
    }

    /// 0.0 for mismatched lengths, empty input, or a zero-norm vector.
    fn cosine_similarity(&self, a: &[f32], b: &[f32]) -> f64 {
        if a.is_empty() || a.len() != b.len() {
            return 0.0;
        }
        let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
        for (x, y) in a.iter().zip(b) {
            let (x, y) = (f64::from(*x), f64::from(*y));
            dot += x * y;
            na += x * x;
            nb += y * y;
        }
        let denom = na.sqrt() * nb.sqrt();
        if denom == 0.0 || !denom.is_finite() {
            return 0.0;
        }
        dot / denom
    }

    fn is_service_available(&self) -> bool;
}
