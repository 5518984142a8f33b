//! Message templating for combat log lines.
//!
//! Templates use `{path}` placeholders (`"{user.name} hits {target.name} for
//! {damageTaken}"`). Values come from a flat [`TemplateContext`] keyed by the
//! dotted path. Unresolved placeholders are left in the output verbatim.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Flat string map of template values keyed by dotted path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.values.insert(key.into(), value.to_string());
    }

    /// Builder form of [`TemplateContext::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Copies every entry of `other` over this context.
    pub fn merge(&mut self, other: TemplateContext) {
        self.values.extend(other.values);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Replaces every `{path}` in `template` found in `ctx`.
pub fn format_text(template: &str, ctx: &TemplateContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let key = after[..close].trim();
                match ctx.get(key) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[open..open + close + 2]),
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> TemplateContext {
        TemplateContext::new()
            .with("user.name", "Hero")
            .with("target.name", "Goblin")
            .with("damageTaken", 4)
    }

    #[test]
    fn substitutes_dotted_paths() {
        assert_eq!(
            format_text("{user.name} hits {target.name} for {damageTaken}.", &ctx()),
            "Hero hits Goblin for 4."
        );
    }

    #[test]
    fn unresolved_placeholders_stay_verbatim() {
        assert_eq!(
            format_text("{user.name} uses {weapon}", &ctx()),
            "Hero uses {weapon}"
        );
        assert_eq!(format_text("open { brace", &ctx()), "open { brace");
        assert_eq!(format_text("{{user.name}", &ctx()), "{Hero");
        assert_eq!(format_text("tail {", &ctx()), "tail {");
    }

    #[test]
    fn merge_overrides_existing_keys() {
        let mut base = ctx();
        base.merge(TemplateContext::new().with("damageTaken", 9));
        assert_eq!(base.get("damageTaken"), Some("9"));
        assert_eq!(base.len(), 3);
    }
}
