//! Action parsing from planner output.
//!
//! The planner is asked to reply with
//! `{"action": "search_web", "args": {"query": "..."}}` or
//! `{"action": "fetch_url", "args": {"url": "..."}}`, but models wrap JSON in
//! code fences, add prose, or skip the JSON entirely. Anything that is not a
//! recognized action becomes [`ActionDescriptor::None`] carrying the original
//! output, which the orchestrator returns as the answer.

use crate::action::descriptor::{
    ActionDefaults, ActionDescriptor, FETCH_URL, FetchTarget, SEARCH_WEB,
};
use serde_json::{Map, Value};

const FENCE: &str = "```";
const FENCE_LANG: &str = "json";

/// Parse planner output using [`ActionDefaults::default`].
pub fn parse_action(model_output: &str) -> ActionDescriptor {
    parse_action_with(model_output, &ActionDefaults::default())
}

/// Parse planner output, filling omitted arguments from `defaults`.
pub fn parse_action_with(model_output: &str, defaults: &ActionDefaults) -> ActionDescriptor {
    let cleaned = strip_code_fences(model_output);

    let parsed = serde_json::from_str::<Value>(&cleaned)
        .ok()
        .and_then(|json| action_from_json(&json, defaults));

    parsed.unwrap_or_else(|| ActionDescriptor::None {
        text: model_output.to_string(),
    })
}

/// Remove every ```` ``` ```` / ```` ```json ```` marker (case-insensitive) and
/// trim surrounding backticks and whitespace.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        if rest
            .get(..FENCE_LANG.len())
            .is_some_and(|lang| lang.eq_ignore_ascii_case(FENCE_LANG))
        {
            rest = &rest[FENCE_LANG.len()..];
        }
    }
    out.push_str(rest);

    out.trim_matches(|c: char| c == '`' || c.is_whitespace())
        .to_string()
}

fn action_from_json(json: &Value, defaults: &ActionDefaults) -> Option<ActionDescriptor> {
    let action = json.get("action")?.as_str()?.trim();
    let args = json.get("args")?;

    match action {
        SEARCH_WEB => search_from_args(args.as_object()?, defaults),
        FETCH_URL => fetch_from_args(args, defaults),
        _ => None,
    }
}

fn search_from_args(args: &Map<String, Value>, defaults: &ActionDefaults) -> Option<ActionDescriptor> {
    let query = args.get("query")?.as_str()?.trim();
    if query.is_empty() {
        return None;
    }

    let max_results = args
        .get("max_results")
        .and_then(json_value_to_u64)
        .filter(|n| *n > 0)
        .map(|n| n.min(u32::MAX as u64) as u32)
        .unwrap_or(defaults.max_results);

    Some(ActionDescriptor::SearchWeb {
        query: query.to_string(),
        max_results,
    })
}

/// `args` may be one target record, a record with a `urls` list, or a list
/// of targets. List entries may be records or bare URL strings.
fn fetch_from_args(args: &Value, defaults: &ActionDefaults) -> Option<ActionDescriptor> {
    let entries: Vec<&Value> = match args {
        Value::Object(map) => match map.get("urls").and_then(Value::as_array) {
            Some(urls) if !map.contains_key("url") => urls.iter().collect(),
            _ => vec![args],
        },
        Value::Array(items) => items.iter().collect(),
        _ => return None,
    };

    let shared_max = args
        .get("max_chars")
        .and_then(json_value_to_u64)
        .filter(|n| *n > 0)
        .map(|n| n as usize);

    let mut targets = Vec::new();
    let mut skipped = 0;
    for entry in entries {
        match target_from_entry(entry, shared_max.unwrap_or(defaults.max_chars)) {
            Some(target) => targets.push(target),
            None => skipped += 1,
        }
    }

    if targets.is_empty() {
        return None;
    }

    Some(ActionDescriptor::FetchUrl { targets, skipped })
}

fn target_from_entry(entry: &Value, default_max: usize) -> Option<FetchTarget> {
    let (url, max_chars) = match entry {
        Value::String(url) => (url.as_str(), None),
        Value::Object(map) => (
            map.get("url")?.as_str()?,
            map.get("max_chars").and_then(json_value_to_u64),
        ),
        _ => return None,
    };

    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    Some(FetchTarget::new(
        url,
        max_chars
            .filter(|n| *n > 0)
            .map(|n| n as usize)
            .unwrap_or(default_max),
    ))
}

/// Numbers may arrive as JSON numbers or numeric strings.
fn json_value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_and_raw_json_parse_identically() {
        let raw = r#"{"action":"search_web","args":{"query":"x"}}"#;
        let fenced = "```json\n{\"action\":\"search_web\",\"args\":{\"query\":\"x\"}}\n```";

        let expected = ActionDescriptor::SearchWeb {
            query: "x".to_string(),
            max_results: 5,
        };
        assert_eq!(parse_action(raw), expected);
        assert_eq!(parse_action(fenced), expected);
    }

    #[test]
    fn test_fence_language_tag_is_case_insensitive() {
        let fenced = "```JSON\n{\"action\":\"search_web\",\"args\":{\"query\":\"rust\"}}\n```";
        assert_eq!(parse_action(fenced).kind(), "search_web");
    }

    #[test]
    fn test_plain_sentence_becomes_none() {
        assert_eq!(
            parse_action("just a plain sentence"),
            ActionDescriptor::None {
                text: "just a plain sentence".to_string()
            }
        );
    }

    #[test]
    fn test_none_keeps_original_output_untouched() {
        let output = "```\nHere is my answer\n```";
        assert_eq!(
            parse_action(output),
            ActionDescriptor::None {
                text: output.to_string()
            }
        );
    }

    #[test]
    fn test_prose_around_json_is_not_an_action() {
        let output = "Sure! {\"action\": \"search_web\", \"args\": {\"query\": \"x\"}}";
        assert!(matches!(parse_action(output), ActionDescriptor::None { .. }));
    }

    #[test]
    fn test_unknown_action_becomes_none() {
        let output = r#"{"action": "delete_everything", "args": {}}"#;
        assert!(matches!(parse_action(output), ActionDescriptor::None { .. }));
    }

    #[test]
    fn test_missing_args_becomes_none() {
        let output = r#"{"action": "search_web"}"#;
        assert!(matches!(parse_action(output), ActionDescriptor::None { .. }));

        let output = r#"{"action": "search_web", "args": {"q": "wrong field"}}"#;
        assert!(matches!(parse_action(output), ActionDescriptor::None { .. }));
    }

    #[test]
    fn test_search_max_results_variants() {
        let output = r#"{"action":"search_web","args":{"query":"Model Context Protocol","max_results":3}}"#;
        assert_eq!(
            parse_action(output),
            ActionDescriptor::SearchWeb {
                query: "Model Context Protocol".to_string(),
                max_results: 3
            }
        );

        let output = r#"{"action":"search_web","args":{"query":"q","max_results":"7"}}"#;
        assert!(matches!(
            parse_action(output),
            ActionDescriptor::SearchWeb { max_results: 7, .. }
        ));

        let output = r#"{"action":"search_web","args":{"query":"q","max_results":0}}"#;
        let defaults = ActionDefaults {
            max_results: 9,
            max_chars: 100,
        };
        assert!(matches!(
            parse_action_with(output, &defaults),
            ActionDescriptor::SearchWeb { max_results: 9, .. }
        ));
    }

    #[test]
    fn test_fetch_single_url() {
        let output = r#"{"action":"fetch_url","args":{"url":"https://example.com"}}"#;
        assert_eq!(
            parse_action(output),
            ActionDescriptor::FetchUrl {
                targets: vec![FetchTarget::new("https://example.com", 4000)],
                skipped: 0
            }
        );
    }

    #[test]
    fn test_fetch_list_of_targets_keeps_order() {
        let output = r#"{"action":"fetch_url","args":[
            {"url":"https://a.example","max_chars":200},
            {"url":"https://b.example"},
            "https://c.example"
        ]}"#;
        let ActionDescriptor::FetchUrl { targets, skipped } = parse_action(output) else {
            panic!("expected fetch_url");
        };
        assert_eq!(skipped, 0);
        assert_eq!(
            targets,
            vec![
                FetchTarget::new("https://a.example", 200),
                FetchTarget::new("https://b.example", 4000),
                FetchTarget::new("https://c.example", 4000),
            ]
        );
    }

    #[test]
    fn test_fetch_urls_field() {
        let output = r#"{"action":"fetch_url","args":{"urls":["https://a.example","https://b.example"],"max_chars":50}}"#;
        let ActionDescriptor::FetchUrl { targets, .. } = parse_action(output) else {
            panic!("expected fetch_url");
        };
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].max_chars, 50);
    }

    #[test]
    fn test_zero_max_chars_uses_default() {
        let shared = r#"{"action":"fetch_url","args":{"urls":["https://a.example"],"max_chars":0}}"#;
        let ActionDescriptor::FetchUrl { targets, .. } = parse_action(shared) else {
            panic!("expected fetch_url");
        };
        assert_eq!(targets, vec![FetchTarget::new("https://a.example", 4000)]);

        let single = r#"{"action":"fetch_url","args":{"url":"https://b.example","max_chars":"0"}}"#;
        let ActionDescriptor::FetchUrl { targets, .. } = parse_action(single) else {
            panic!("expected fetch_url");
        };
        assert_eq!(targets[0].max_chars, 4000);
    }

    #[test]
    fn test_fetch_entries_without_url_are_skipped() {
        let output = r#"{"action":"fetch_url","args":[{"link":"https://a.example"},{"url":"https://b.example"},42]}"#;
        let ActionDescriptor::FetchUrl { targets, skipped } = parse_action(output) else {
            panic!("expected fetch_url");
        };
        assert_eq!(targets, vec![FetchTarget::new("https://b.example", 4000)]);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_fetch_without_any_url_becomes_none() {
        let output = r#"{"action":"fetch_url","args":[{"link":"x"}]}"#;
        assert!(matches!(parse_action(output), ActionDescriptor::None { .. }));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("``` {\"a\":1} ```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("`{}`"), "{}");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }
}
