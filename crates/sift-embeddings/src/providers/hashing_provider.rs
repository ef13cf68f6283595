//! Feature-hashing embedding provider.
//!
//! Deterministic fixed-dimension vectors from ASCII words and CJK
//! character unigrams/bigrams, hashed into buckets with blake3. No network,
//! always available. Useful offline and in tests.

use std::collections::BTreeMap;

use sift_core::errors::SiftResult;
use sift_core::traits::IEmbeddingProvider;

pub struct HashingProvider {
    dimensions: usize,
}

impl HashingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(term: &str, dims: usize) -> (usize, f32) {
        let hash = blake3::hash(term.as_bytes());
        let bytes = hash.as_bytes();
        let mut idx = [0u8; 8];
        idx.copy_from_slice(&bytes[..8]);
        let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
        ((u64::from_le_bytes(idx) % dims as u64) as usize, sign)
    }

    /// ASCII alphanumeric runs become lowercase words; CJK runs contribute
    /// each char plus each adjacent pair.
    fn features(text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut word = String::new();
        let mut cjk_run: Vec<char> = Vec::new();

        let flush_cjk = |run: &mut Vec<char>, out: &mut Vec<String>| {
            for (i, c) in run.iter().enumerate() {
                out.push(c.to_string());
                if let Some(next) = run.get(i + 1) {
                    out.push(format!("{c}{next}"));
                }
            }
            run.clear();
        };

        for c in text.chars() {
            if is_cjk(c) {
                if !word.is_empty() {
                    out.push(std::mem::take(&mut word));
                }
                cjk_run.push(c);
            } else if c.is_alphanumeric() {
                flush_cjk(&mut cjk_run, &mut out);
                word.extend(c.to_lowercase());
            } else {
                flush_cjk(&mut cjk_run, &mut out);
                if !word.is_empty() {
                    out.push(std::mem::take(&mut word));
                }
            }
        }
        flush_cjk(&mut cjk_run, &mut out);
        if !word.is_empty() {
            out.push(word);
        }
        out
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let features = Self::features(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if features.is_empty() {
            return vec;
        }

        // Ordered so bucket collisions always sum in the same order.
        let mut tf: BTreeMap<&str, f32> = BTreeMap::new();
        for f in &features {
            *tf.entry(f.as_str()).or_default() += 1.0;
        }
        let total = features.len() as f32;
        for (term, count) in tf {
            // Longer features (bigrams, words) carry more signal.
            let weight = 1.0 + (term.chars().count() as f32).ln();
            let (bucket, sign) = Self::bucket(term, self.dimensions);
            vec[bucket] += sign * (count / total) * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32, 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x20000..=0x2A6DF)
}

impl IEmbeddingProvider for HashingProvider {
    fn embed(&self, text: &str) -> SiftResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> SiftResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn is_available(&self) -> bool {
        true
    }
}
