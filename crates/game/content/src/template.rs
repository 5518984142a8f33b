//! `$param` substitution inside parameterized action records.
//!
//! Substitution walks the JSON tree and only rewrites string leaves; object
//! keys are never touched. A leaf that is exactly one token takes the
//! parameter's value with its JSON type (so `"cost": "$cost"` becomes a
//! number); tokens embedded in longer text are replaced by the value's text.
//! Tokens with no parameter are left as written.

use serde_json::{Map, Value};

/// Parameter map attached to an action reference.
pub type Params = Map<String, Value>;

/// Overlays caller parameters on the declared defaults. A `null` caller
/// value counts as missing.
pub fn merge_params(defaults: &Params, overrides: Option<&Params>) -> Params {
    let mut merged = defaults.clone();
    for (key, value) in overrides.into_iter().flatten() {
        if !value.is_null() {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Substitutes every `$token` in string leaves of `value`.
pub fn substitute(value: &mut Value, params: &Params) {
    match value {
        Value::String(text) => {
            if let Some(replacement) = whole_token(text).and_then(|name| lookup(params, name)) {
                *value = replacement.clone();
            } else if text.contains('$') {
                *text = substitute_text(text, params);
            }
        }
        Value::Array(items) => {
            for item in items {
                substitute(item, params);
            }
        }
        Value::Object(fields) => {
            for field in fields.values_mut() {
                substitute(field, params);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn lookup<'a>(params: &'a Params, name: &str) -> Option<&'a Value> {
    params.get(name).filter(|value| !value.is_null())
}

/// `"$name"` -> `Some("name")` when the whole string is a single token.
fn whole_token(text: &str) -> Option<&str> {
    let name = text.strip_prefix('$')?;
    (!name.is_empty() && name.chars().all(is_token_char)).then_some(name)
}

fn substitute_text(text: &str, params: &Params) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let len = after.find(|c: char| !is_token_char(c)).unwrap_or(after.len());
        let name = &after[..len];

        match lookup(params, name).filter(|_| !name.is_empty()) {
            Some(Value::String(s)) => out.push_str(s),
            Some(other) => out.push_str(&other.to_string()),
            None => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[len..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("params must be an object"),
        }
    }

    #[test]
    fn nested_leaves_are_substituted() {
        let mut record = json!({
            "name": "$name",
            "cost": "$cost",
            "display": ["{user.name} swings the $name for $damage"],
            "effects": [{"id": "damage", "amount": "$damage", "type": "$type"}]
        });
        let params = params(json!({"name": "Club", "cost": 2, "damage": "1d4", "type": "bludgeoning"}));
        substitute(&mut record, &params);

        assert_eq!(
            record,
            json!({
                "name": "Club",
                "cost": 2,
                "display": ["{user.name} swings the Club for 1d4"],
                "effects": [{"id": "damage", "amount": "1d4", "type": "bludgeoning"}]
            })
        );
    }

    #[test]
    fn unmatched_tokens_stay_verbatim() {
        let mut record = json!({"a": "$missing", "b": "cost $ and $missing!", "$key": 1});
        substitute(&mut record, &params(json!({"other": 1})));
        assert_eq!(record, json!({"a": "$missing", "b": "cost $ and $missing!", "$key": 1}));
    }

    #[test]
    fn numbers_inside_text_are_rendered() {
        let mut record = json!("costs $cost AP");
        substitute(&mut record, &params(json!({"cost": 2})));
        assert_eq!(record, json!("costs 2 AP"));
    }

    #[test]
    fn caller_values_override_defaults_except_null() {
        let defaults = params(json!({"name": "Attack", "damage": "1d4"}));
        let overrides = params(json!({"name": "Stab", "damage": null, "extra": true}));
        let merged = merge_params(&defaults, Some(&overrides));
        assert_eq!(
            Value::Object(merged),
            json!({"name": "Stab", "damage": "1d4", "extra": true})
        );
        assert_eq!(merge_params(&defaults, None), defaults);
    }
}
