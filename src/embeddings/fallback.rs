//! Deterministic hash-based pseudo-embedding
//!
//! Only guarantees availability: a fixed-length, unit-norm vector for any input.
//! Retrieval quality is not a goal.

use sha2::Digest;
use sha2::Sha256;

/// Slots touched per token
const SLOTS_PER_TOKEN: usize = 10;

/// Build the fallback embedding for `text`
///
/// Tokens are the lowercased whitespace-separated words. Token `i` adds
/// `1 / (i + 1)` to up to ten consecutive slots starting at its hash, then the
/// whole vector is L2-normalised. Empty input yields the zero vector.
pub fn fallback_embedding(text: &str, dimension: usize) -> Vec<f32> {
    let mut embedding = vec![0.0_f32; dimension];
    if dimension == 0 {
        return embedding;
    }

    let lowered = text.to_lowercase();
    for (position, token) in lowered.split_whitespace().enumerate() {
        let start = (token_hash(token) % dimension as u128) as usize;
        let weight = 1.0 / (position as f32 + 1.0);

        for offset in 0..SLOTS_PER_TOKEN.min(dimension) {
            embedding[(start + offset) % dimension] += weight;
        }
    }

    let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut embedding {
            *value /= norm;
        }
    }

    embedding
}

/// 128-bit token hash: the leading half of its SHA-256 digest
fn token_hash(token: &str) -> u128 {
    let digest = Sha256::digest(token.as_bytes());
    let mut bytes = [0_u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EMBEDDING_DIM;

    fn l2_norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    #[test]
    fn test_fixed_dimension_and_unit_norm() {
        for text in [
            "What is ROS 2?",
            "a",
            "Gazebo simulates physics, gravity, collisions and sensors",
            "ہیلو دنیا",
        ] {
            let embedding = fallback_embedding(text, EMBEDDING_DIM);
            assert_eq!(embedding.len(), EMBEDDING_DIM);
            assert!((l2_norm(&embedding) - 1.0).abs() < 1e-5, "norm for {text:?}");
        }
    }

    #[test]
    fn test_empty_input_is_zero_vector() {
        for text in ["", "   \n\t "] {
            let embedding = fallback_embedding(text, EMBEDDING_DIM);
            assert_eq!(embedding.len(), EMBEDDING_DIM);
            assert!(embedding.iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn test_deterministic_and_case_insensitive() {
        assert_eq!(
            fallback_embedding("Isaac Sim", EMBEDDING_DIM),
            fallback_embedding("isaac   sim", EMBEDDING_DIM)
        );
    }

    #[test]
    fn test_word_order_changes_weights() {
        assert_ne!(
            fallback_embedding("robot arm", EMBEDDING_DIM),
            fallback_embedding("arm robot", EMBEDDING_DIM)
        );
    }

    #[test]
    fn test_single_token_spreads_over_ten_slots() {
        let embedding = fallback_embedding("ros", EMBEDDING_DIM);
        assert_eq!(embedding.iter().filter(|&&x| x > 0.0).count(), 10);
    }

    #[test]
    fn test_small_dimension_wraps() {
        let embedding = fallback_embedding("ros", 4);
        assert_eq!(embedding.len(), 4);
        assert!((l2_norm(&embedding) - 1.0).abs() < 1e-5);
    }
}
