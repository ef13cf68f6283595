//! Cache key layout: `<prefix><slot><digest>`.

pub const CONTEXT_SLOT: &str = "context:";
pub const INTENT_SLOT: &str = "llm:intent:";
pub const ENTITY_SLOT: &str = "llm:entity:";
pub const REWRITE_SLOT: &str = "llm:rewrite:";
pub const SYNONYM_SLOT: &str = "synonym:";
pub const EMBEDDING_SLOT: &str = "embedding:";

/// Short blake3 digest of arbitrary text, keeping keys bounded.
pub fn digest(text: &str) -> String {
    let hash = blake3::hash(text.as_bytes());
    hash.to_hex()[..32].to_string()
}

pub fn key(prefix: &str, slot: &str, text: &str) -> String {
    format!("{prefix}{slot}{}", digest(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_stable_and_slot_scoped() {
        let a = key("p:", SYNONYM_SLOT, "缴费");
        assert_eq!(a, key("p:", SYNONYM_SLOT, "缴费"));
        assert!(a.starts_with("p:synonym:"));
        assert_ne!(a, key("p:", CONTEXT_SLOT, "缴费"));
    }
}
