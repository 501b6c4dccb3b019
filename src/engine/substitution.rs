//! `{{key}}` placeholder substitution
//!
//! Tokens are resolved in a single left-to-right scan over the template, so
//! text inserted for one key is never scanned again for other tokens and the
//! order in which keys were added does not matter. Tokens without a value are
//! copied to the output untouched.

use std::collections::HashMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Values available to a template, keyed by placeholder name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateVars {
    vars: HashMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a placeholder, coercing the value to its string form
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.vars.insert(key.into(), value.to_string());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for TemplateVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = TemplateVars::new();
        for (key, value) in iter {
            vars.insert(key, value);
        }
        vars
    }
}

/// Replace every `{{key}}` in `template` whose key is bound in `vars`
pub fn substitute(template: &str, vars: &TemplateVars) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);

        let after_open = &rest[start + OPEN.len()..];
        if let Some(end) = after_open.find(CLOSE) {
            if let Some(value) = vars.get(&after_open[..end]) {
                output.push_str(value);
                rest = &after_open[end + CLOSE.len()..];
                continue;
            }
        }

        // Not a bound token here; a token may still start one byte later
        output.push('{');
        rest = &rest[start + 1..];
    }

    output.push_str(rest);
    output
}
