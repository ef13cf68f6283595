//! Prompt templates. `{query}`, `{intent}` and `{entities}` are substituted.

pub const INTENT_PROMPT: &str = "你是搜索服务的查询意图分析助手。请判断用户查询的意图,只返回以下类型之一:\n\
- QUERY: 查找信息、服务或功能\n\
- COMMAND: 要求执行某个操作\n\
- QUESTION: 提出需要解释的问题\n\
- NAVIGATION: 想进入某个页面或入口\n\n\
用户查询: {query}\n\n\
只返回意图类型,不要有其他内容。";

pub const ENTITY_PROMPT: &str = "你是搜索服务的实体识别助手。请从用户查询中识别实体,类型包括:\n\
PERSON, LOCATION, ORGANIZATION, DATE_TIME, PRODUCT, MONEY, EVENT。\n\n\
用户查询: {query}\n\n\
以JSON数组返回,格式: [{\"type\":\"PRODUCT\",\"text\":\"信用卡\"}]\n\
没有实体时返回 []";

pub const REWRITE_PROMPT: &str = "你是搜索服务的查询优化助手。根据意图和实体,把用户查询改写成更精确的搜索词。\n\n\
原始查询: {query}\n\
意图类型: {intent}\n\
识别实体: {entities}\n\n\
规则:\n\
- 查询已经清晰时直接返回原查询\n\
- 只返回改写后的查询文本,不要解释\n\
- 不超过30个字";

pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}
