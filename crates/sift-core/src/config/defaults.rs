// Single source of truth for all default values.

// --- Pipeline ---
pub const DEFAULT_SIMPLE_QUERY_THRESHOLD: usize = 2;
pub const DEFAULT_SMART_SKIP_ENABLED: bool = true;
pub const DEFAULT_PIPELINE_BUDGET_MS: u64 = 5_000;
pub const DEFAULT_CONTEXT_CACHE_ENABLED: bool = true;

// --- Stages (priority, advisory timeout ms) ---
pub const NORMALIZATION_PRIORITY: i32 = 100;
pub const NORMALIZATION_TIMEOUT_MS: u64 = 500;
pub const SYNONYM_PRIORITY: i32 = 60;
pub const SYNONYM_TIMEOUT_MS: u64 = 800;
pub const SEMANTIC_PRIORITY: i32 = 55;
pub const SEMANTIC_TIMEOUT_MS: u64 = 1_000;
pub const HOT_TOPIC_PRIORITY: i32 = 50;
pub const HOT_TOPIC_TIMEOUT_MS: u64 = 1_000;
pub const INTENT_PRIORITY: i32 = 45;
pub const INTENT_TIMEOUT_MS: u64 = 3_000;
pub const ENTITY_PRIORITY: i32 = 40;
pub const ENTITY_TIMEOUT_MS: u64 = 3_000;
pub const DISAMBIGUATION_PRIORITY: i32 = 35;
pub const DISAMBIGUATION_TIMEOUT_MS: u64 = 500;
pub const REWRITE_PRIORITY: i32 = 30;
pub const REWRITE_TIMEOUT_MS: u64 = 3_000;
pub const QUERY_BUILDER_PRIORITY: i32 = 10;
pub const QUERY_BUILDER_TIMEOUT_MS: u64 = 1_000;

// --- Expansion ---
pub const DEFAULT_MAX_SYNONYMS: usize = 5;
pub const DEFAULT_SEMANTIC_THRESHOLD: f64 = 0.70;
pub const DEFAULT_MAX_SEMANTIC_TERMS: usize = 5;
pub const DEFAULT_LOWERCASE_NORMALIZATION: bool = false;

// --- Cache ---
pub const DEFAULT_CACHE_KEY_PREFIX: &str = "query_understanding:";
pub const DEFAULT_CONTEXT_TTL_SECS: u64 = 600; // 10 minutes
pub const DEFAULT_LLM_TTL_SECS: u64 = 3_600; // 1 hour
pub const DEFAULT_SYNONYM_TTL_SECS: u64 = 86_400; // 24 hours
pub const DEFAULT_EMBEDDING_TTL_SECS: u64 = 86_400; // 24 hours
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "api";
pub const DEFAULT_EMBEDDING_API_URL: &str = "https://api.siliconflow.cn/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "BAAI/bge-m3";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1024;
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 2;

// --- LLM ---
pub const DEFAULT_LLM_ENABLED: bool = false;
pub const DEFAULT_LLM_API_URL: &str = "https://api.siliconflow.cn/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "Qwen/Qwen2.5-7B-Instruct";
pub const DEFAULT_LLM_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 512;

// --- Retrieval ---
pub const DEFAULT_AUTO_SEMANTIC_WEIGHT: f64 = 0.3;
pub const DEFAULT_SHORT_QUERY_MAX_CHARS: usize = 2;
pub const DEFAULT_VECTOR_FIELD: &str = "content_vector";
pub const DEFAULT_KNN_K: usize = 10;
pub const DEFAULT_KNN_NUM_CANDIDATES: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 20;

// --- Search engine ---
pub const DEFAULT_ENGINE_ENDPOINT: &str = "http://localhost:9200";
pub const DEFAULT_ENGINE_INDEX: &str = "search_data";
pub const DEFAULT_ENGINE_TIMEOUT_MS: u64 = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
