use regex::Regex;
use serde_json::{Map, Value};

/// Extract the first JSON object from a model reply that may carry prose or
/// markdown fences around it.
pub fn extract_object(s: &str) -> Option<Map<String, Value>> {
    let trimmed = s.trim();

    // First try: the whole reply
    if let Some(obj) = parse_object(trimmed) {
        return Some(obj);
    }

    // Second try: a fenced code block
    if let Ok(re) = Regex::new(r"```(?:json|JSON)?\s*\n?([\s\S]*?)\n?```") {
        for cap in re.captures_iter(s) {
            if let Some(obj) = cap.get(1).and_then(|m| parse_object(m.as_str().trim())) {
                return Some(obj);
            }
        }
    }

    // Third try: the first balanced brace span that parses
    let mut search_from = 0;
    while let Some(offset) = s[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_end(s, start) {
            if let Some(obj) = parse_object(&s[start..end]) {
                return Some(obj);
            }
        }
        search_from = start + 1;
    }

    None
}

fn parse_object(s: &str) -> Option<Map<String, Value>> {
    if !s.starts_with('{') {
        return None;
    }
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Byte offset one past the brace closing the one at `start`.
/// Braces inside string literals do not count.
fn balanced_end(s: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
