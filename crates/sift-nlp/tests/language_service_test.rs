use sift_cache::CacheGateway;
use sift_core::config::{CacheConfig, LlmConfig};
use sift_core::context::{Entity, EntityType, Intent};
use sift_core::traits::ILanguageService;
use sift_nlp::{LlmLanguageService, RuleBasedLanguageService};

fn unreachable_llm(cache: Option<CacheGateway>) -> LlmLanguageService {
    LlmLanguageService::new(
        LlmConfig {
            enabled: true,
            api_key: Some("test-key".into()),
            // Nothing listens here.
            api_url: "http://127.0.0.1:9/v1/chat/completions".into(),
            timeout_ms: 200,
            ..Default::default()
        },
        cache,
    )
}

#[test]
fn enabled_llm_with_key_reports_available() {
    assert!(unreachable_llm(None).is_service_available());
}

#[test]
fn transport_failures_are_errors_not_panics() {
    let svc = unreachable_llm(None);
    assert!(svc.recognize_intent("缴费").is_err());
    assert!(svc.extract_entities("缴费").is_err());
    assert!(svc.rewrite_query("缴费", Intent::Query, &[]).is_err());
}

#[test]
fn cached_answers_bypass_transport() {
    let cache = CacheGateway::in_memory(CacheConfig::default());
    cache.put_entities("张三转账", &[Entity::new("张三", EntityType::Person)]);
    cache.put_rewrite("还钱", Intent::Command, "信用卡还款");
    let svc = unreachable_llm(Some(cache));

    assert_eq!(svc.extract_entities("张三转账").unwrap()[0].text, "张三");
    assert_eq!(svc.rewrite_query("还钱", Intent::Command, &[]).unwrap(), "信用卡还款");
}

#[test]
fn rule_based_service_is_always_available() {
    let svc = RuleBasedLanguageService::new().unwrap();
    assert!(svc.is_service_available());
    assert_eq!(svc.name(), "rule-based");
}
